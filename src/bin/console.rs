//! Line-oriented front end for the service records page.
//!
//! Commands: `list`, `search <vehicle_no>`, `submit`, `edit <id>`,
//! `cancel`, `delete <id>`, `help`, `quit`.

use std::io::{self, BufRead, Write};

use dotenv::dotenv;
use log::error;

use vehicle_service_be::client::render::render_page;
use vehicle_service_be::client::{
    update, Action, HttpServiceApi, PageState, ServiceForm, SERVICE_TYPES,
};
use vehicle_service_be::config::ClientConfig;

const HELP: &str = "commands: list | search <vehicle_no> | submit | edit <id> | cancel | delete <id> | help | quit";

/// Typed at a field prompt to blank the field.
const CLEAR: &str = "-";

/// Resolves one prompt answer: empty keeps `current`, `-` clears it.
fn answer(line: &str, current: &str) -> String {
    match line {
        "" => current.to_string(),
        CLEAR => String::new(),
        text => text.to_string(),
    }
}

/// Prompts for one field, showing `current`.
fn prompt(input: &mut impl BufRead, label: &str, current: &str) -> io::Result<String> {
    if current.is_empty() {
        print!("{label}: ");
    } else {
        print!("{label} [{current}]: ");
    }
    io::stdout().flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(answer(line.trim_end_matches(['\r', '\n']), current))
}

fn fill_form(input: &mut impl BufRead, current: &ServiceForm) -> io::Result<ServiceForm> {
    println!("service types: {}", SERVICE_TYPES.join(", "));
    println!("enter keeps the shown value, `{CLEAR}` clears it");
    Ok(ServiceForm {
        vehicle_no: prompt(input, "vehicle no", &current.vehicle_no)?,
        owner_name: prompt(input, "owner name", &current.owner_name)?,
        service_type: prompt(input, "service type", &current.service_type)?,
        service_date: prompt(input, "service date (YYYY-MM-DD)", &current.service_date)?,
        next_service_date: prompt(input, "next service date", &current.next_service_date)?,
        cost: prompt(input, "cost", &current.cost)?,
        remarks: prompt(input, "remarks", &current.remarks)?,
    })
}

fn parse_id(arg: &str) -> Option<i32> {
    arg.trim().parse().ok()
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("warn"));

    let config = match ClientConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            error!("Failed to load configuration: {err}");
            std::process::exit(1);
        }
    };
    let api = match HttpServiceApi::new(&config.service_api_url) {
        Ok(api) => api,
        Err(err) => {
            error!("{err}");
            std::process::exit(1);
        }
    };

    let stdin = io::stdin();
    let mut input = stdin.lock();

    let mut state = update(PageState::default(), Action::Load, &api).await;
    println!("{}\n\n{HELP}", render_page(&state));

    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            break;
        }
        let (command, arg) = line.trim().split_once(' ').unwrap_or((line.trim(), ""));

        let action = match command {
            "" => continue,
            "quit" | "exit" => break,
            "help" => {
                println!("{HELP}");
                continue;
            }
            "list" => Action::Load,
            "search" => Action::Search(arg.to_string()),
            "cancel" => Action::Cancel,
            "submit" => Action::Submit(fill_form(&mut input, &state.form)?),
            "edit" => match parse_id(arg) {
                Some(id) => Action::Edit(id),
                None => {
                    println!("usage: edit <id>");
                    continue;
                }
            },
            "delete" => match parse_id(arg) {
                Some(id) => {
                    let answer = prompt(
                        &mut input,
                        "Are you sure you want to delete this service record? (y/N)",
                        "",
                    )?;
                    Action::Delete {
                        id,
                        confirmed: answer.trim().eq_ignore_ascii_case("y"),
                    }
                }
                None => {
                    println!("usage: delete <id>");
                    continue;
                }
            },
            other => {
                println!("unknown command `{other}`\n{HELP}");
                continue;
            }
        };

        state = update(state, action, &api).await;
        println!("{}", render_page(&state));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn empty_answer_keeps_and_dash_clears() {
        assert_eq!(answer("", "1500"), "1500");
        assert_eq!(answer("-", "1500"), "");
        assert_eq!(answer("900", "1500"), "900");
    }

    #[test]
    fn edited_form_can_blank_optional_fields() {
        let current = ServiceForm {
            vehicle_no: "KA01AB1234".to_string(),
            owner_name: "A Rao".to_string(),
            service_type: "Oil Change".to_string(),
            service_date: "2024-01-10".to_string(),
            next_service_date: "2024-07-10".to_string(),
            cost: "1500".to_string(),
            remarks: "synthetic oil".to_string(),
        };
        let mut input = Cursor::new("\n\n\n\n-\n-\n-\n");

        let form = fill_form(&mut input, &current).unwrap();

        assert_eq!(form.vehicle_no, "KA01AB1234");
        assert_eq!(form.next_service_date, "");
        assert_eq!(form.cost, "");
        assert_eq!(form.remarks, "");
        assert_eq!(form.validate().unwrap().cost, None);
    }
}
