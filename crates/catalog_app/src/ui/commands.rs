use catalog_core::Msg;

use crate::app::AppEvent;

pub const HELP: &str = "\
Commands:
  search <text>              name search (no text clears it)
  status <value|->           Alive, Dead, Unknown; '-' for any
  gender <value|->           Male, Female, Genderless, Unknown; '-' for any
  filters <status> <gender>  set both filters at once
  clear                      drop search and filters
  page <n> | next | prev     navigate
  retry                      re-run a failed request
  help | quit";

/// Turns one input line into an event.
pub fn parse_line(line: &str) -> AppEvent {
    let line = line.trim_end_matches(&['\r', '\n'][..]);
    let (command, rest) = match line.trim_start().split_once(' ') {
        Some((command, rest)) => (command, rest),
        None => (line.trim(), ""),
    };

    match command.to_ascii_lowercase().as_str() {
        "" => AppEvent::Core(Msg::Tick),
        "search" | "s" => AppEvent::Core(Msg::SearchChanged(rest.to_string())),
        "status" => AppEvent::Core(Msg::StatusChanged(filter_value(rest))),
        "gender" => AppEvent::Core(Msg::GenderChanged(filter_value(rest))),
        "filters" => {
            let mut values = rest.split_whitespace();
            match (values.next(), values.next(), values.next()) {
                (Some(status), Some(gender), None) => AppEvent::Core(Msg::FiltersChanged {
                    status: filter_value(status),
                    gender: filter_value(gender),
                }),
                _ => AppEvent::Invalid("usage: filters <status> <gender>".to_string()),
            }
        }
        "clear" => AppEvent::Core(Msg::ClearQuery),
        "page" | "p" => match rest.trim().parse::<u32>() {
            Ok(page) => AppEvent::Core(Msg::PageRequested(page)),
            Err(_) => AppEvent::Invalid(format!("not a page number: {:?}", rest.trim())),
        },
        "next" | "n" => AppEvent::Core(Msg::NextPage),
        "prev" | "previous" => AppEvent::Core(Msg::PreviousPage),
        "retry" | "r" => AppEvent::Core(Msg::RetryClicked),
        "help" | "?" => AppEvent::Help,
        "quit" | "exit" | "q" => AppEvent::Quit,
        other => AppEvent::Invalid(format!("unknown command {other:?}; type 'help'")),
    }
}

fn filter_value(raw: &str) -> String {
    match raw.trim() {
        "-" => String::new(),
        value => value.to_string(),
    }
}
