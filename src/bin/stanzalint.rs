/*
** This file is a part of Tinder (XMPP stanza object model)
** Copyright (C) 2000-2025 Gurer Ozen
**
** Tinder is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

use std::fs;
use std::io::Read;
use std::io::stdin;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use tinder::DocumentFactory;
use tinder::xmpp::Packet;
use tinder::xmpp::Roster;
use tinder::xmpp::RosterItem;
use tinder::xmpp::Stanza;
use tinder::xmpp::XmppError;

#[derive(Parser)]
#[command(name = "stanzalint", version, about = "Checks XMPP stanzas and prints what they carry")]
struct Args {
    /// Files with one stanza each, standard input is read if none given
    files: Vec<PathBuf>,
    /// List the items of roster IQs
    #[arg(short, long)]
    roster: bool,
    /// Print each stanza again after parsing
    #[arg(short, long)]
    echo: bool,
}

enum LintError {
    Io(std::io::Error),
    Xmpp(XmppError),
}

impl From<std::io::Error> for LintError {
    fn from(err: std::io::Error) -> Self {
        LintError::Io(err)
    }
}

impl From<XmppError> for LintError {
    fn from(err: XmppError) -> Self {
        LintError::Xmpp(err)
    }
}

impl From<tinder::DocumentError> for LintError {
    fn from(err: tinder::DocumentError) -> Self {
        LintError::Xmpp(err.into())
    }
}

fn stanza_type(stanza: &Stanza) -> Result<Option<String>, XmppError> {
    Ok(match stanza {
        Stanza::Message(msg) => Some(msg.message_type()?.to_string()),
        Stanza::Presence(presence) => Some(presence.presence_type()?.to_string()),
        Stanza::Iq(iq) => iq.iq_type()?.map(|iq_type| iq_type.to_string()),
    })
}

fn print_item(item: &RosterItem) {
    let mut line = format!("  item {}", item.jid());
    if let Some(name) = item.name() {
        line.push_str(&format!(" name={name}"));
    }
    if let Some(subscription) = item.subscription() {
        line.push_str(&format!(" subscription={}", subscription.as_str()));
    }
    if let Some(ask) = item.ask() {
        line.push_str(&format!(" ask={}", ask.as_str()));
    }
    if !item.groups().is_empty() {
        line.push_str(&format!(" groups={}", item.groups().join(",")));
    }
    println!("{line}");
}

struct Linter {
    show_roster: bool,
    echo: bool,
}

impl Linter {
    fn read(&self, file: Option<&PathBuf>) -> Result<String, LintError> {
        match file {
            Some(path) => Ok(fs::read_to_string(path)?),
            None => {
                let mut text = String::new();
                stdin().read_to_string(&mut text)?;
                Ok(text)
            }
        }
    }

    fn check(&self, name: &str, file: Option<&PathBuf>) -> Result<(), LintError> {
        let text = self.read(file)?;
        let doc = DocumentFactory::global().parse(&text)?;
        debug!(input = name, "parsed {} bytes", text.len());
        let stanza = Stanza::from_document(doc)?;

        let mut line = format!("{name}: {}", stanza.kind());
        if let Some(stanza_type) = stanza_type(&stanza)? {
            line.push_str(&format!(" type={stanza_type}"));
        }
        if let Some(id) = stanza.id() {
            line.push_str(&format!(" id={id}"));
        }
        if let Some(from) = stanza.from()? {
            line.push_str(&format!(" from={from}"));
        }
        if let Some(to) = stanza.to()? {
            line.push_str(&format!(" to={to}"));
        }
        println!("{line}");

        if let Some(error) = stanza.error()? {
            let condition = error
                .condition()?
                .map_or("unknown".to_string(), |condition| condition.to_string());
            match error.text() {
                Some(text) => println!("  error {condition}: {text}"),
                None => println!("  error {condition}"),
            }
        }
        if self.show_roster
            && let Stanza::Iq(iq) = &stanza
        {
            let roster = Roster::from_iq(iq.clone());
            for item in roster.items()? {
                print_item(&item);
            }
        }
        if self.echo {
            println!("{stanza}");
        }
        Ok(())
    }

    fn lint(&self, name: &str, file: Option<&PathBuf>) -> bool {
        match self.check(name, file) {
            Ok(()) => true,
            Err(LintError::Io(err)) => {
                eprintln!("Error reading '{name}': {err}");
                false
            }
            Err(LintError::Xmpp(err)) => {
                eprintln!("Invalid stanza in '{name}': {err}");
                false
            }
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let linter = Linter {
        show_roster: args.roster,
        echo: args.echo,
    };
    let mut ok = true;
    if args.files.is_empty() {
        ok = linter.lint("stdin", None);
    } else {
        for file in &args.files {
            let name = file.display().to_string();
            ok &= linter.lint(&name, Some(file));
        }
    }

    if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE }
}
