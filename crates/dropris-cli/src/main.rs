mod collaborator;
mod command;
mod logging;
mod view;

fn main() -> anyhow::Result<()> {
    command::run()
}
