use clap::builder::styling::{AnsiColor, Color, Style};
use clap::builder::Styles;
use crossterm::style::Stylize;

pub fn get_styles() -> Styles {
    clap::builder::Styles::styled()
        .usage(
            Style::new()
                .bold()
                .underline()
                .fg_color(Some(Color::Ansi(AnsiColor::Cyan))),
        )
        .header(
            Style::new()
                .bold()
                .underline()
                .fg_color(Some(Color::Ansi(AnsiColor::Cyan))),
        )
        .literal(
            Style::new()
                .bold()
                .fg_color(Some(Color::Ansi(AnsiColor::Green))),
        )
        .invalid(
            Style::new()
                .bold()
                .fg_color(Some(Color::Ansi(AnsiColor::Red))),
        )
        .error(
            Style::new()
                .bold()
                .fg_color(Some(Color::Ansi(AnsiColor::Red))),
        )
        .valid(
            Style::new()
                .bold()
                .fg_color(Some(Color::Ansi(AnsiColor::Green))),
        )
        .placeholder(Style::new().fg_color(Some(Color::Ansi(AnsiColor::BrightBlack))))
}

const RULE_WIDTH: usize = 40;

/// Section heading with a rule underneath, used for the menu banner.
pub fn print_heading(text: &str) {
    println!("{}", text.bold().cyan());
    println!("{}", "-".repeat(RULE_WIDTH).dark_grey());
}

pub fn print_rule() {
    println!("{}", "-".repeat(RULE_WIDTH).dark_grey());
}

pub fn print_error(text: &str) {
    eprintln!("{} {}", "Error:".bold().red(), text);
}

pub fn print_notice(text: &str) {
    println!("{}", text.green());
}
