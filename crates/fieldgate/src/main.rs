fn main() -> anyhow::Result<()> {
    fieldgate::cli::main()
}
