const KUBEMART_CRATES: [&str; 3] = ["kubemart", "km_core", "km_api"];

pub fn setup_for_cli(debug: bool) {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(cli_env_filter(debug))
        .without_time()
        .compact()
        .init();
}

// Only our own crates get bumped to debug; kube and hyper at debug level drown out everything
// else on the terminal.
pub fn cli_env_filter(debug: bool) -> String {
    let level = if debug { "debug" } else { "warn" };
    KUBEMART_CRATES
        .iter()
        .fold(String::from("warn"), |acc, krate| format!("{acc},{krate}={level}"))
}
