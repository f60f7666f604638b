fn main() -> anyhow::Result<()> {
    greentic_feedback::cli::main()
}
