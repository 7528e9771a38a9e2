pub mod response;

pub use response::{ImportOutcome, ImportSummary};

use crate::usecases::common::UseCaseMetadata;

pub struct ImportFromPetpooja;

impl UseCaseMetadata for ImportFromPetpooja {
    fn usecase_index() -> &'static str {
        "u501"
    }

    fn usecase_name() -> &'static str {
        "import_from_petpooja"
    }

    fn display_name() -> &'static str {
        "PetPooja Sales Fetcher"
    }

    fn description() -> &'static str {
        "Load sales data from the PetPooja POS API into the local sales_data table"
    }
}
