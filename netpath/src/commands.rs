use crate::CLAP_STYLING;
use clap::{ArgAction, arg, command};

pub(crate) fn command_argument_builder() -> clap::Command {
    clap::Command::new("netpath")
        .version(env!("CARGO_PKG_VERSION"))
        .bin_name("netpath")
        .styles(CLAP_STYLING)
        .arg(arg!(-q --"quiet" "Suppress banner and non-essential output").required(false))
        .arg(
            arg!(-v --"verbose" "Increase log verbosity (-v info, -vv debug, -vvv trace)")
                .required(false)
                .action(ArgAction::Count),
        )
        .subcommand_required(false)
        .subcommand(
            command!("reconstruct")
                .about(
                    "Rebuild nodes, links and paths from exported path search results and \
                print a report.",
                )
                .arg(
                    arg!(-i --"input" <FILE>)
                        .required(true)
                        .help("Path search results as JSON (results document, array or JSON lines)")
                        .value_parser(clap::value_parser!(std::path::PathBuf)),
                )
                .arg(
                    arg!(-o --"output" <FILE>)
                        .required(false)
                        .help("Save report to file (default: display to screen)")
                        .value_parser(clap::value_parser!(std::path::PathBuf)),
                )
                .arg(
                    arg!(-f --"format" <FORMAT>)
                        .required(false)
                        .help("Report format: text, json, csv, markdown, dot")
                        .value_parser(["text", "json", "csv", "markdown", "md", "dot"])
                        .default_value("text"),
                )
                .arg(
                    arg!(--"src" <IP>)
                        .required(false)
                        .help("Source address the search was run for")
                        .requires("dest"),
                )
                .arg(
                    arg!(--"dest" <IP>)
                        .required(false)
                        .help("Destination address the search was run for")
                        .requires("src"),
                )
                .arg(
                    arg!(--"direction" <DIRECTION>)
                        .required(false)
                        .help("Search direction")
                        .value_parser(["forward", "backward", "bi-directed"])
                        .default_value("forward"),
                )
                .arg(
                    arg!(--"health" <FILE>)
                        .required(false)
                        .help("Health search results to grade the devices on the paths")
                        .value_parser(clap::value_parser!(std::path::PathBuf)),
                )
                .arg(
                    arg!(--"progress")
                        .required(false)
                        .help("Show a progress bar while rows are ingested")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            command!("query")
                .about("Print the path search for a source and destination")
                .arg(
                    arg!(--"src" <IP>)
                        .required(true)
                        .help("Source address"),
                )
                .arg(
                    arg!(--"dest" <IP>)
                        .required(true)
                        .help("Destination address"),
                )
                .arg(
                    arg!(--"direction" <DIRECTION>)
                        .required(false)
                        .help("Search direction")
                        .value_parser(["forward", "backward", "bi-directed"])
                        .default_value("forward"),
                )
                .arg(
                    arg!(--"earliest" <TIME>)
                        .required(false)
                        .help("Earliest time of the search window")
                        .default_value("-60m@m"),
                )
                .arg(
                    arg!(--"latest" <TIME>)
                        .required(false)
                        .help("Latest time of the search window")
                        .default_value("now"),
                ),
        )
        .subcommand(
            command!("health")
                .about("Group exported health search results by device and grade them")
                .arg(
                    arg!(-i --"input" <FILE>)
                        .required(true)
                        .help("Health search results as JSON")
                        .value_parser(clap::value_parser!(std::path::PathBuf)),
                )
                .arg(
                    arg!(-f --"format" <FORMAT>)
                        .required(false)
                        .help("Output format: text, json")
                        .value_parser(["text", "json"])
                        .default_value("text"),
                ),
        )
}
