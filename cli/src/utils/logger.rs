/// RUST_LOG wins when set. Otherwise `info`, with the filter crates raised to
/// `debug` when verbose.
pub fn init_logger(verbose: bool) {
    let default_filters = if verbose {
        "info,filter_engine=debug,cti_filter=debug"
    } else {
        "info"
    };
    let filters = std::env::var("RUST_LOG").unwrap_or_else(|_| default_filters.to_string());
    pretty_env_logger::formatted_builder()
        .parse_filters(&filters)
        .init();
}
