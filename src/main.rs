use std::path::PathBuf;
use std::time::Instant;

use log::{info, warn};

use cultura_base::{
    BaseCache, BaseReaderConfig, FilterCatalog, FilterSet, InterpretStatus, Result,
    SelectionSummary, apply_filter_set, interpret, load_base,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Setup logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let Some(path) = args.next().map(PathBuf::from) else {
        warn!("Usage: cultura-base <base.csv> [free-text filter request]");
        return Ok(());
    };
    let request = args.next();

    let config = BaseReaderConfig::default();

    // Load and prepare the base
    let start = Instant::now();
    let raw = load_base(&path, &config)?;
    let mut cache = BaseCache::new(config.cache_version.clone());
    let prepared = cache.get_or_prepare(&raw)?;
    info!(
        "Prepared {} rows with {} columns in {:?}",
        prepared.num_rows(),
        prepared.num_columns(),
        start.elapsed()
    );

    // Derive the filter catalog
    let catalog = FilterCatalog::from_batch(&prepared, &config);
    info!(
        "Catalog: {} estados, {} municípios, {} linguagens, {} ações",
        catalog.estado.len(),
        catalog.municipio.len(),
        catalog.linguagem_artistica.len(),
        catalog.acoes_estruturantes.len()
    );

    // Resolve the selection: either interpreted from free text or a sample
    let filters = if let Some(request) = request {
        let outcome = interpret(&request, &catalog, &config).await;
        match outcome.status {
            InterpretStatus::Ok => {
                info!("Interpreted request: {}", outcome.message);
                outcome.filters
            }
            InterpretStatus::Invalid => {
                warn!("Request not interpretable: {}", outcome.message);
                return Ok(());
            }
            InterpretStatus::Error => {
                warn!("Interpretation failed: {}", outcome.message);
                return Ok(());
            }
        }
    } else {
        FilterSet {
            regiao: catalog.regiao.clone(),
            ..FilterSet::default()
        }
    };

    // Apply and summarize
    let start = Instant::now();
    let filtered = apply_filter_set(&prepared, &filters, &catalog.acoes_estruturantes)?;
    info!(
        "Filtered to {} of {} rows in {:?}",
        filtered.num_rows(),
        prepared.num_rows(),
        start.elapsed()
    );

    let summary = SelectionSummary::build(&prepared, &filtered, &filters);
    println!("{}", serde_json::to_string_pretty(&summary)?);

    Ok(())
}
