use crate::cli::{ArticlesArgs, Cli, Command, LoginArgs};

use clap::Parser;

#[test]
fn given_articles_flags_when_parsed_then_args_populated() {
    let cli = Cli::try_parse_from([
        "newsdesk",
        "articles",
        "--search",
        "banjir",
        "--page",
        "3",
        "--limit",
        "20",
        "--json",
    ])
    .unwrap();

    assert!(cli.json);
    assert_eq!(
        cli.command,
        Command::Articles(ArticlesArgs {
            search: Some("banjir".to_string()),
            category: None,
            page: 3,
            limit: Some(20),
            all: false,
        })
    );
}

#[test]
fn given_login_without_password_when_parsed_then_rejected() {
    let result = Cli::try_parse_from(["newsdesk", "login", "--email", "a@b.c"]);

    assert!(result.is_err());
}

#[test]
fn given_login_flags_when_parsed_then_credentials_captured() {
    let cli = Cli::try_parse_from([
        "newsdesk",
        "--verbose",
        "login",
        "--email",
        "dewi@example.com",
        "--password",
        "rahasia",
    ])
    .unwrap();

    assert!(cli.verbose);
    assert_eq!(
        cli.command,
        Command::Login(LoginArgs {
            email: "dewi@example.com".to_string(),
            password: "rahasia".to_string(),
        })
    );
}

#[test]
fn given_visit_route_when_parsed_then_route_captured() {
    let cli = Cli::try_parse_from(["newsdesk", "visit", "/admin/dashboard", "--data-dir", "/tmp/nd"])
        .unwrap();

    assert_eq!(
        cli.command,
        Command::Visit {
            route: "/admin/dashboard".to_string()
        }
    );
    assert_eq!(cli.data_dir.unwrap().to_str(), Some("/tmp/nd"));
}
