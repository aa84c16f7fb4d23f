#[macro_use]
extern crate log;
extern crate fern;

mod fixtures;
mod parse;
mod prelude;
mod settings;

use clap::{App, Arg, ArgMatches, SubCommand};
use indoc::indoc;

use crate::prelude::*;

fn main() {
    let matches = app().get_matches();
    let settings = Settings::from_matches(&matches);

    if let Err(err) = prepare_logger(settings.verbosity, settings.log_file.as_deref()) {
        eprintln!("Unable to set up logging: {}", err);
        std::process::exit(1);
    }

    if let Err(err) = run(&matches, &settings) {
        error!("{}", err);
        eprintln!("{}", err);
        std::process::exit(1);
    }
}

fn run(matches: &ArgMatches, settings: &Settings) -> Result<()> {
    if matches.subcommand_matches("fixtures").is_some() {
        let written = fixtures::write_fixtures(Path::new(&settings.out_dir))?;
        for path in written {
            println!("{}", path.display());
        }
        Ok(())
    } else if let Some(matches) = matches.subcommand_matches("write") {
        let output = write_array(matches)?;
        println!("{}", output.display());
        Ok(())
    } else {
        println!("No subcommand match. Use npyfixtures --help to view help information.");
        std::process::exit(1);
    }
}

fn write_array(matches: &ArgMatches) -> Result<PathBuf> {
    // required args, clap rejects their absence
    let output = PathBuf::from(matches.value_of("output").unwrap_or_default());
    let values = parse::parse_values(matches.value_of("values").unwrap_or_default())?;
    let element_type: ElementType = matches.value_of("dtype").unwrap_or("<f8").parse()?;
    let shape = match matches.value_of("shape") {
        Some(shape) => parse::parse_shape(shape)?,
        None => vec![values.len()],
    };

    info!("writing {} values as {} {:?}", values.len(), element_type, shape);
    npy_core::save(&output, &values, element_type, &shape)?;
    Ok(output)
}

fn prepare_logger(verbosity: u8, log_file: Option<&str>) -> Result<()> {
    let level = match verbosity {
        0 => log::LevelFilter::Error,
        1 => log::LevelFilter::Warn,
        2 => log::LevelFilter::Info,
        3 => log::LevelFilter::Debug,
        _ => log::LevelFilter::max(),
    };

    let mut dispatch = fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "{}[{}][{}] {}",
                chrono::Local::now().format("[%Y-%m-%d][%H:%M:%S:%f]"),
                record.target(),
                record.level(),
                message
            ))
        })
        .level(level)
        .chain(std::io::stdout());
    if let Some(log_file) = log_file {
        dispatch = dispatch.chain(fern::log_file(log_file)?);
    }
    dispatch.apply()?;
    Ok(())
}

fn app<'a, 'b>() -> App<'a, 'b> {
    App::new("npyfixtures")
        .version("0.1.0")
        .author("Ricky Han <tectonic@rickyhan.com>")
        .about("writes numpy .npy fixture files")
        .arg(Arg::with_name("v").short("v").multiple(true).global(true).help(
            "Sets the level of verbosity",
        ))
        .arg(
            Arg::with_name("log_file")
                .short("l")
                .long("log_file")
                .value_name("LOG_FILE")
                .global(true)
                .takes_value(true)
                .help("Sets the log file to write to"),
        )
        .subcommand(SubCommand::with_name("fixtures")
            .about(indoc!("
                Writes npy-double.npy, npy-float.npy, npy-long.npy and npy-int.npy,
                each holding [1, 2, 3, 4, 5].

                Examples:
                npyfixtures fixtures -o test/test-data
                "))
            .arg(
                Arg::with_name("out_dir")
                    .short("o")
                    .long("out_dir")
                    .value_name("FOLDER")
                    .help("folder to write to (default $NPY_OUT_DIR or .)")
                    .takes_value(true),
            ))
        .subcommand(SubCommand::with_name("write")
            .about(indoc!("
                Encodes comma separated values into a single .npy file

                Examples:
                npyfixtures write -t '<i4' -o ints.npy 1,2,3,4,5
                npyfixtures write -t float64 -s 2,3 -o grid.npy 0,0.5,1,1.5,2,2.5
                "))
            .arg(
                Arg::with_name("values")
                    .value_name("VALUES")
                    .help("comma separated values")
                    .required(true)
                    .allow_hyphen_values(true)
                    .index(1),
            )
            .arg(
                Arg::with_name("output")
                    .short("o")
                    .long("output")
                    .value_name("OUTPUT")
                    .help("file to write")
                    .required(true)
                    .takes_value(true),
            )
            .arg(
                Arg::with_name("dtype")
                    .short("t")
                    .long("dtype")
                    .value_name("DTYPE")
                    .help("<f8, <f4, <i8, <i4 or double, float, long, int (default <f8)")
                    .takes_value(true),
            )
            .arg(
                Arg::with_name("shape")
                    .short("s")
                    .long("shape")
                    .value_name("SHAPE")
                    .help("comma separated dimensions (default: one dimension)")
                    .takes_value(true),
            ))
}
