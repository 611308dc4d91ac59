use anyhow::{Result, bail};
use cdm_admin_core::{
    MemoryAddressBar, PageSize, PaginationSortController, QueryParams, QueryStringCodec,
};
use cdm_admin_http::ListingResponse;
use cdm_admin_service::{ListingPhase, ProfileService, SalesmanListing, TracingReporter};
use cdm_admin_storage::PaginatedResult;
use std::path::PathBuf;
use std::sync::Arc;

use crate::open_storage;

/// Prints one salesman page for the given address-bar parameters.
pub(crate) async fn run_list(
    seed: Option<PathBuf>,
    params: Vec<(String, String)>,
    page_size: PageSize,
) -> Result<()> {
    let storage = open_storage(seed)?;
    let address_bar = MemoryAddressBar::new(params.into_iter().collect::<QueryParams>());
    let controller =
        PaginationSortController::new(QueryStringCodec::salesman(page_size), address_bar);
    let mut view = SalesmanListing::new(controller, storage, Arc::new(TracingReporter));

    view.refresh().await;
    let result = match view.phase() {
        ListingPhase::Loaded(page) => page.clone(),
        ListingPhase::Empty => {
            let total = view.pagination().map_or(0, |p| p.total_elements);
            PaginatedResult::new(Vec::new(), total)
        },
        ListingPhase::Failed(report) => bail!("{}: {}", report.title, report.description),
        ListingPhase::Idle | ListingPhase::Loading => bail!("listing fetch did not complete"),
    };

    let controller = view.controller();
    let response = ListingResponse::new(
        controller.state(),
        result,
        controller.address_bar().current().clone(),
    );
    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}

pub(crate) async fn run_profile(seed: Option<PathBuf>, id: String) -> Result<()> {
    let profiles = ProfileService::new(open_storage(seed)?);
    match profiles.get_profile(&id).await? {
        Some(profile) => println!("{}", serde_json::to_string_pretty(&profile)?),
        None => println!("Profile not found: {id}"),
    }
    Ok(())
}
