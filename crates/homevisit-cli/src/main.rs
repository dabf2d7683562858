mod client;
mod command;
mod settings;
mod table;
mod util;

fn main() -> anyhow::Result<()> {
    command::run()
}
