use clap::Parser;
use mandelbrot_gradient::{Cli, CliCommand, CliController, LocationTable, PpmFilePresenter};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let cli = Cli::parse();
    let locations = LocationTable::default();
    let controller = CliController::new(PpmFilePresenter::new());

    match cli.command(&locations)? {
        CliCommand::ListLocations => {
            controller.list_locations(&locations, &mut std::io::stdout().lock())?;
        }
        CliCommand::Render { request, output } => {
            controller.write(request, &output)?;
            println!("{}", output.display());
        }
        CliCommand::Gallery {
            template,
            directory,
        } => {
            for path in controller.gallery(&template, &directory, &locations)? {
                println!("{}", path.display());
            }
        }
    }

    Ok(())
}
