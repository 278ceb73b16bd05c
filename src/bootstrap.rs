use tracing::{info, warn};

use crate::column::{ColumnController, ColumnState, Surface};
use crate::config::ColumnConfig;
use crate::fetcher::Fetcher;

/// Runs one full load cycle.
///
/// Every surface shows a loading placeholder while all feeds are fetched
/// concurrently. Each column then gets a fresh controller with its first page
/// appended, or an error notice and no items if its feed failed.
///
/// Surfaces are paired with `columns` by position; extra entries on either
/// side are ignored.
pub async fn bootstrap<S: Surface>(
    fetcher: &Fetcher,
    columns: &[ColumnConfig],
    mut surfaces: Vec<S>,
) -> Vec<ColumnController<S>> {
    surfaces.truncate(columns.len());
    let columns = &columns[..surfaces.len()];

    for surface in surfaces.iter_mut() {
        surface.show_loading();
    }

    let results = fetcher.fetch_all(columns).await;

    let controllers: Vec<ColumnController<S>> = columns
        .iter()
        .zip(surfaces)
        .zip(results)
        .map(|((config, mut surface), result)| {
            let items = match result {
                Ok(items) => {
                    surface.clear();
                    items
                }
                Err(e) => {
                    warn!("Column '{}' failed to load: {}", config.name, e);
                    surface.show_error(&format!("Could not load {}: {}", config.name, e));
                    Vec::new()
                }
            };

            let mut controller = ColumnController::new(ColumnState::new(items, config), surface);
            controller.setup();
            controller
        })
        .collect();

    info!("Loaded {} columns", controllers.len());
    controllers
}
