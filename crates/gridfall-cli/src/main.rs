mod bot;
mod command;
mod schema;
mod util;

fn main() -> anyhow::Result<()> {
    command::run()
}
