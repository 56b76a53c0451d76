use clap::Parser;

use editora::cli::commands::brief::BriefCommand;
use editora::cli::commands::portfolio::PortfolioCommand;
use editora::cli::commands::profile::ProfileCommand;
use editora::cli::{Cli, Commands, OutputFormat};
use editora::core::{BriefStatus, ProfessionalType};
use editora::search::{ExperienceLevel, SortBy};

fn parse(args: &[&str]) -> Cli {
    let mut argv = vec!["editora"];
    argv.extend_from_slice(args);
    Cli::parse_from(argv)
}

#[test]
fn non_finite_max_rate_flag_is_ignored() {
    for raw in ["NaN", "inf", "infinity"] {
        let cli = parse(&["search", "--max-rate", raw]);
        let Commands::Search(args) = cli.command else {
            panic!("expected search command");
        };
        assert_eq!(args.to_filters().max_rate, None, "{raw}");
    }

    let cli = parse(&["search", "--query", "maxRate=30", "--max-rate", "NaN"]);
    let Commands::Search(args) = cli.command else {
        panic!("expected search command");
    };
    assert_eq!(args.to_filters().max_rate, Some(30.0));
}

#[test]
fn parse_search_flags() {
    let cli = parse(&[
        "search",
        "--software",
        "1,2",
        "--max-rate",
        "80",
        "--level",
        "expert",
        "--type",
        "Colorist",
        "--country",
        "Chile,Perú",
        "--sort",
        "price-high",
        "--page",
        "2",
    ]);
    match cli.command {
        Commands::Search(args) => {
            let filters = args.to_filters();
            assert_eq!(filters.software.unwrap().len(), 2);
            assert_eq!(filters.max_rate, Some(80.0));
            assert_eq!(filters.experience_level, Some(ExperienceLevel::Expert));
            assert_eq!(filters.professional_type, Some(ProfessionalType::Colorist));
            assert_eq!(filters.country.unwrap().len(), 2);
            assert_eq!(filters.sort_by, Some(SortBy::PriceHigh));
            assert_eq!(filters.page, Some(2));
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn unknown_sort_is_rejected_by_the_cli() {
    let result = Cli::try_parse_from(["editora", "search", "--sort", "random"]);
    assert!(result.is_err());
}

#[test]
fn parse_portfolio_reorder() {
    match parse(&["portfolio", "reorder", "4", "9,7,8"]).command {
        Commands::Portfolio(args) => match args.command {
            PortfolioCommand::Reorder { profile, items } => {
                assert_eq!(profile, 4);
                assert_eq!(items, vec![9, 7, 8]);
            }
            other => panic!("unexpected subcommand: {other:?}"),
        },
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn parse_profile_update_fields() {
    match parse(&["profile", "update", "3", "--basic-rate", "55.5", "--styles", "2,5"]).command {
        Commands::Profile(args) => match args.command {
            ProfileCommand::Update { id, fields } => {
                assert_eq!(id, 3);
                assert_eq!(fields.basic_rate, Some(55.5));
                assert_eq!(fields.styles, Some(vec![2, 5]));
                assert!(fields.headline.is_none());
            }
            other => panic!("unexpected subcommand: {other:?}"),
        },
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn parse_brief_status() {
    match parse(&["brief", "status", "12", "in-progress"]).command {
        Commands::Brief(args) => match args.command {
            BriefCommand::Status { id, status } => {
                assert_eq!(id, 12);
                assert_eq!(status, BriefStatus::InProgress);
            }
            other => panic!("unexpected subcommand: {other:?}"),
        },
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn global_flags_after_subcommand() {
    let cli = parse(&["user", "list", "--robot", "-vv"]);
    assert!(cli.robot);
    assert_eq!(cli.verbose, 2);
    assert!(cli.is_robot());
}

#[test]
fn format_overrides_robot() {
    let cli = parse(&["--robot", "--format", "human", "seed"]);
    assert_eq!(cli.output_format(), OutputFormat::Human);
    assert!(!cli.is_robot());
}

#[test]
fn serve_bind_flag() {
    match parse(&["serve", "--bind", "0.0.0.0:9000"]).command {
        Commands::Serve(args) => assert_eq!(args.bind.as_deref(), Some("0.0.0.0:9000")),
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn cli_definition_is_consistent() {
    use clap::CommandFactory;
    Cli::command().debug_assert();
}
