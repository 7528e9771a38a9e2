/// Identification of a use case for logs and reports
pub trait UseCaseMetadata {
    /// Short index, e.g. "u501"
    fn usecase_index() -> &'static str;

    /// Technical name, e.g. "import_from_petpooja"
    fn usecase_name() -> &'static str;

    /// Human readable name
    fn display_name() -> &'static str;

    fn description() -> &'static str {
        ""
    }

    /// Full name like "u501_import_from_petpooja"
    fn full_name() -> String {
        format!("{}_{}", Self::usecase_index(), Self::usecase_name())
    }
}
