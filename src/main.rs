fn main() -> Result<(), Box<dyn std::error::Error>> {
    poncho_chat::cli::main()
}
