use nom::{
    bytes::complete::take_while1,
    character::complete::space1,
    combinator::{all_consuming, opt, rest},
    sequence::{pair, preceded},
    IResult,
};

use crate::error::{Error, ErrorKind, Result};
use crate::session::Session;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Continue,
    Message(String),
    Quit,
}

pub type ActionResult = Result<Outcome>;

pub enum Action {
    Arg(fn(&mut Session, &str) -> ActionResult),
    OptArg(fn(&mut Session, Option<&str>) -> ActionResult),
    NoArg(fn(&mut Session) -> ActionResult),
    Repeatable(fn(&mut Session, u32) -> ActionResult),
}

pub const HELP: &str = "\
next [n]                      move forward n days (default 1)
prev [n]                      move back n days (default 1)
day <n>                       jump to day n of this month
note <text>                   add a note to the current day
quest <title> | <description> add a quest for the current day
complete <title>              toggle a quest between active and done
highlight [title]             highlight a quest's days, or clear
events                        list the scripted timeline
quests                        list all quests
show                          redraw the calendar
quit                          leave";

fn usage(cmd: &str, expected: &str) -> Error {
    Error::new(
        ErrorKind::CommandParse,
        &format!("usage: {} {}", cmd, expected),
    )
}

const COMMANDS: &[(&str, Action)] = &[
    (
        "next",
        Action::Repeatable(|s, n| {
            s.advance(n as i64);
            Ok(Outcome::Continue)
        }),
    ),
    (
        "n",
        Action::Repeatable(|s, n| {
            s.advance(n as i64);
            Ok(Outcome::Continue)
        }),
    ),
    (
        "prev",
        Action::Repeatable(|s, n| {
            s.retreat(n as i64);
            Ok(Outcome::Continue)
        }),
    ),
    (
        "p",
        Action::Repeatable(|s, n| {
            s.retreat(n as i64);
            Ok(Outcome::Continue)
        }),
    ),
    (
        "day",
        Action::Arg(|s, arg| {
            let day = arg.parse::<u32>().map_err(|_| usage("day", "<1-28>"))?;
            s.jump_to_day(day)?;
            Ok(Outcome::Continue)
        }),
    ),
    (
        "note",
        Action::Arg(|s, text| {
            s.add_note(text);
            Ok(Outcome::Continue)
        }),
    ),
    (
        "quest",
        Action::Arg(|s, arg| {
            let (title, description) = arg
                .split_once('|')
                .ok_or_else(|| usage("quest", "<title> | <description>"))?;
            s.add_quest(title.trim(), description.trim());
            Ok(Outcome::Continue)
        }),
    ),
    (
        "complete",
        Action::Arg(|s, title| {
            s.toggle_active(title);
            Ok(Outcome::Continue)
        }),
    ),
    (
        "highlight",
        Action::OptArg(|s, title| {
            match title {
                Some(title) => s.toggle_highlight(title),
                None => s.set_highlight(None),
            }
            Ok(Outcome::Continue)
        }),
    ),
    (
        "events",
        Action::NoArg(|s| {
            let lines: Vec<String> = s
                .campaign()
                .events
                .iter()
                .map(|e| format!("{:<18} {:<28} {}", e.date.to_string(), e.title, e.category))
                .collect();
            Ok(Outcome::Message(lines.join("\n")))
        }),
    ),
    (
        "quests",
        Action::NoArg(|s| {
            let lines: Vec<String> = s
                .quests()
                .iter()
                .map(|q| {
                    format!(
                        "[{}] {} ({} to {})",
                        if q.active { ' ' } else { 'x' },
                        q.title,
                        q.start,
                        q.end
                    )
                })
                .collect();
            Ok(Outcome::Message(lines.join("\n")))
        }),
    ),
    ("show", Action::NoArg(|_| Ok(Outcome::Continue))),
    (
        "help",
        Action::NoArg(|_| Ok(Outcome::Message(HELP.to_owned()))),
    ),
    ("quit", Action::NoArg(|_| Ok(Outcome::Quit))),
    ("q", Action::NoArg(|_| Ok(Outcome::Quit))),
];

fn command_line(input: &str) -> IResult<&str, (&str, Option<&str>)> {
    all_consuming(pair(
        take_while1(|c: char| c.is_alphanumeric()),
        opt(preceded(space1, rest)),
    ))(input)
}

fn lookup(name: &str) -> Option<&'static Action> {
    COMMANDS
        .iter()
        .find(|(cmd, _)| *cmd == name)
        .map(|(_, action)| action)
}

/// Parses one line of input and applies it to `session`.
pub fn run_command(session: &mut Session, line: &str) -> ActionResult {
    let line = line.trim();
    if line.is_empty() {
        return Ok(Outcome::Continue);
    }

    let (_, (name, arg)) = command_line(line).map_err(|_| {
        Error::new(
            ErrorKind::CommandParse,
            &format!("cannot read '{}', try 'help'", line),
        )
    })?;
    let arg = arg.map(str::trim).filter(|a| !a.is_empty());

    let action = lookup(name).ok_or_else(|| {
        Error::new(
            ErrorKind::CommandParse,
            &format!("unknown command '{}', try 'help'", name),
        )
    })?;

    log::debug!("Running '{}' with argument {:?}", name, arg);

    match (action, arg) {
        (Action::NoArg(act), None) => act(session),
        (Action::NoArg(_), Some(_)) => Err(usage(name, "takes no argument")),
        (Action::Arg(act), Some(arg)) => act(session, arg),
        (Action::Arg(_), None) => Err(usage(name, "<argument>")),
        (Action::OptArg(act), arg) => act(session, arg),
        (Action::Repeatable(act), None) => act(session, 1),
        (Action::Repeatable(act), Some(count)) => {
            let count = count.parse::<u32>().map_err(|_| usage(name, "[count]"))?;
            act(session, count)
        }
    }
}
