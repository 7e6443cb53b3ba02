use anyhow::Result;

fn main() -> Result<()> {
    sidedoc_cli::main_entry()
}
