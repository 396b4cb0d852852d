fn main() {
    intexpr::cli::run();
}
