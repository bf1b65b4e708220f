fn main() {
    context_forge::app::cli::run();
}
