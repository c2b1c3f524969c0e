use clap::{
    builder::{
        styling::{AnsiColor, Effects, Styles},
        ValueParser,
    },
    Arg, ArgAction, ColorChoice, Command,
};

pub fn validator_log_level() -> ValueParser {
    ValueParser::from(move |level: &str| -> std::result::Result<u8, String> {
        if let Ok(parsed) = level.parse::<u8>() {
            // Successfully parsed as a number
            if parsed <= 5 {
                return Ok(parsed);
            }
        }

        match level.to_lowercase().as_str() {
            "error" => Ok(0),
            "warn" => Ok(1),
            "info" => Ok(2),
            "debug" => Ok(3),
            "trace" => Ok(4),
            _ => Err("invalid log level".to_string()),
        }
    })
}

fn email_arg() -> Arg {
    Arg::new("email")
        .short('e')
        .long("email")
        .help("Account email address")
        .env("ENSALUTI_EMAIL")
        .required(true)
}

fn password_arg() -> Arg {
    Arg::new("password")
        .short('p')
        .long("password")
        .help("Account password")
        .env("ENSALUTI_PASSWORD")
        .required(true)
}

fn token_arg() -> Arg {
    Arg::new("token")
        .short('t')
        .long("token")
        .help("Token from the email link")
        .env("ENSALUTI_TOKEN")
        .required(true)
}

pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    let long_version: &'static str = Box::leak(
        format!("{} - {}", env!("CARGO_PKG_VERSION"), crate::GIT_COMMIT_HASH).into_boxed_str(),
    );

    Command::new("ensaluti")
        .about(env!("CARGO_PKG_DESCRIPTION"))
        .version(env!("CARGO_PKG_VERSION"))
        .long_version(long_version)
        .color(ColorChoice::Auto)
        .styles(styles)
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("base-url")
                .short('u')
                .long("base-url")
                .help("Base URL of the accounts service, example: https://api.example.org")
                .env("ENSALUTI_BASE_URL")
                .global(true),
        )
        .arg(
            Arg::new("verbosity")
                .short('v')
                .long("verbose")
                .help("Verbosity level: ERROR, WARN, INFO, DEBUG, TRACE (default: ERROR)")
                .env("ENSALUTI_LOG_LEVEL")
                .global(true)
                .action(ArgAction::Count)
                .value_parser(validator_log_level()),
        )
        .subcommand(
            Command::new("login")
                .about("Exchange credentials for a bearer token")
                .arg(email_arg())
                .arg(password_arg()),
        )
        .subcommand(
            Command::new("register")
                .about("Create an account; a confirmation email follows")
                .arg(email_arg())
                .arg(
                    Arg::new("full-name")
                        .short('n')
                        .long("full-name")
                        .help("Full name for the new account")
                        .env("ENSALUTI_FULL_NAME")
                        .required(true),
                )
                .arg(password_arg()),
        )
        .subcommand(
            Command::new("recover")
                .about("Request a password recovery email")
                .arg(email_arg()),
        )
        .subcommand(
            Command::new("reset-password")
                .about("Redeem a recovery token and set a new password")
                .arg(token_arg())
                .arg(
                    Arg::new("new-password")
                        .long("new-password")
                        .help("Replacement password")
                        .env("ENSALUTI_NEW_PASSWORD")
                        .required(true),
                ),
        )
        .subcommand(
            Command::new("confirm-email")
                .about("Confirm an email address with an emailed token")
                .arg(token_arg()),
        )
}
