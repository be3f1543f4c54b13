use std::path::Path;

use tracing::debug;

use crate::error::MintError;
use crate::types::{AssetDescriptor, WorkItem};
use crate::wallet::Wallet;

/// Resolve the ordered descriptor list for a batch run
///
/// Either the inline triple or the CSV path must be given, never both and
/// never neither. Single mode produces exactly one descriptor; tabular
/// mode produces one per CSV row.
pub fn resolve_metadata(
    name: Option<String>,
    symbol: Option<String>,
    uri: Option<String>,
    csv_path: Option<&Path>,
    default_royalty_bps: u16,
) -> Result<Vec<AssetDescriptor>, MintError> {
    let inline_given = name.is_some() || symbol.is_some() || uri.is_some();

    match (csv_path, inline_given) {
        (Some(_), true) => Err(MintError::Validation(
            "provide either --name/--symbol/--uri or --metadata-csv, not both".to_string(),
        )),
        (Some(path), false) => load_descriptors_from_csv(path, default_royalty_bps),
        (None, _) => {
            let (Some(name), Some(symbol), Some(uri)) = (name, symbol, uri) else {
                return Err(MintError::Validation(
                    "provide --name, --symbol, and --uri, or use --metadata-csv".to_string(),
                ));
            };
            let descriptor = AssetDescriptor {
                name,
                symbol,
                uri,
                seller_fee_basis_points: default_royalty_bps,
            };
            descriptor.validate()?;
            Ok(vec![descriptor])
        }
    }
}

/// Parse asset descriptors from a CSV file
///
/// The header row must name `name`, `symbol`, and `uri` columns; every
/// data row must fill them. `seller_fee_basis_points` is optional per row
/// and falls back to the global default when absent or empty.
fn load_descriptors_from_csv(
    path: &Path,
    default_royalty_bps: u16,
) -> Result<Vec<AssetDescriptor>, MintError> {
    let mut reader = csv::Reader::from_path(path).map_err(|e| {
        MintError::Validation(format!("cannot read metadata CSV {}: {}", path.display(), e))
    })?;
    let headers = reader
        .headers()
        .map_err(|e| {
            MintError::Validation(format!("metadata CSV {} has no header row: {}", path.display(), e))
        })?
        .clone();

    let mut rows = Vec::new();
    for (line, record) in reader.records().enumerate() {
        let record = record.map_err(|e| {
            MintError::Validation(format!("metadata CSV row {}: {}", line + 1, e))
        })?;
        let field = |column: &str| {
            headers
                .iter()
                .position(|h| h.trim() == column)
                .and_then(|i| record.get(i))
                .map(str::trim)
                .filter(|v| !v.is_empty())
        };

        let name = field("name").ok_or_else(|| {
            MintError::Validation(format!("metadata CSV row {}: 'name' is required", line + 1))
        })?;
        let symbol = field("symbol").ok_or_else(|| {
            MintError::Validation(format!("metadata CSV row {}: 'symbol' is required", line + 1))
        })?;
        let uri = field("uri").ok_or_else(|| {
            MintError::Validation(format!("metadata CSV row {}: 'uri' is required", line + 1))
        })?;
        let seller_fee_basis_points = match field("seller_fee_basis_points") {
            Some(raw) => raw.parse::<u16>().map_err(|_| {
                MintError::Validation(format!(
                    "metadata CSV row {}: invalid seller_fee_basis_points '{}'",
                    line + 1,
                    raw
                ))
            })?,
            None => default_royalty_bps,
        };

        let descriptor = AssetDescriptor {
            name: name.to_string(),
            symbol: symbol.to_string(),
            uri: uri.to_string(),
            seller_fee_basis_points,
        };
        descriptor.validate()?;
        rows.push(descriptor);
    }

    if rows.is_empty() {
        return Err(MintError::Validation(format!(
            "metadata CSV {} contains no data rows",
            path.display()
        )));
    }

    debug!("Loaded {} metadata rows from {}", rows.len(), path.display());
    Ok(rows)
}

/// Pair wallets with descriptors round-robin
///
/// Wallet `i` receives descriptor `i % descriptors.len()`: with a single
/// descriptor every wallet gets the same one, and with fewer rows than
/// wallets the rows repeat. Each wallet appears in exactly one work item,
/// so output length always equals the wallet count.
pub fn assign_work_items(
    wallets: Vec<Wallet>,
    descriptors: &[AssetDescriptor],
) -> Result<Vec<WorkItem>, MintError> {
    if descriptors.is_empty() {
        return Err(MintError::Validation(
            "no asset descriptors to assign".to_string(),
        ));
    }

    Ok(wallets
        .into_iter()
        .enumerate()
        .map(|(index, wallet)| WorkItem {
            wallet,
            descriptor: descriptors[index % descriptors.len()].clone(),
        })
        .collect())
}
