fn main() {
    rancher_catalog::app::cli::run();
}
