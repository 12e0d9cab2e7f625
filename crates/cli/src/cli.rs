use clap::{Args, Parser, Subcommand};
use shared::domain::event::EventDraft;

#[derive(Debug, Parser)]
#[clap(name = "ticketing", about = "Browse events and create new ones on chain")]
pub struct CliOptions {
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List events, optionally filtered by name or location
    Events {
        #[clap(long, short, default_value = "")]
        query: String,
    },
    /// Show a single event
    Show { id: u64 },
    /// Request wallet access and print the granted account
    Connect,
    /// Submit the create-event form
    Create(CreateArgs),
}

/// Fields left out are submitted empty so the form reports them.
#[derive(Debug, Args)]
pub struct CreateArgs {
    #[clap(long, default_value = "")]
    name: String,
    #[clap(long, default_value = "", help = "YYYY-MM-DD")]
    date: String,
    #[clap(long, default_value = "", help = "HH:MM")]
    time: String,
    #[clap(long, default_value = "", help = "ticket price in tokens")]
    price: String,
    #[clap(long, default_value = "")]
    max_attendees: String,
    #[clap(long, default_value = "")]
    description: String,
    #[clap(long, default_value = "")]
    location: String,
}

impl From<CreateArgs> for EventDraft {
    fn from(args: CreateArgs) -> Self {
        EventDraft {
            name: args.name,
            date: args.date,
            time: args.time,
            price: args.price,
            max_attendees: args.max_attendees,
            description: args.description,
            location: args.location,
        }
    }
}
