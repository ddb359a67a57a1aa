//! Command line arguments.

use clap::{Parser, Subcommand};
use covid_commands::Command;
use std::path::PathBuf;

/// Command line arguments
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Configuration file path
    #[arg(short, long, env = "COVID_BOT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log level, overriding the configuration file
    #[arg(short, long)]
    pub log_level: Option<String>,

    /// Post the reply to the configured Telegram chat
    #[arg(long)]
    pub post: bool,

    /// Command to run
    #[command(subcommand)]
    pub command: CommandArg,
}

/// Bot commands as typed on the command line
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum CommandArg {
    /// Case summary of a country
    Cases {
        /// Country name
        #[arg(default_value = "Canada")]
        country: String,
    },
    /// Case summary of a Canadian province or territory
    RegionCases {
        /// Province or territory name or code
        #[arg(default_value = "Ontario")]
        region: String,
    },
    /// Case chart of a country
    PlotCases {
        /// Country name
        #[arg(default_value = "Canada")]
        country: String,
    },
    /// Case chart of a Canadian province or territory
    PlotRegionCases {
        /// Province or territory name or code
        #[arg(default_value = "Ontario")]
        region: String,
    },
    /// Vaccination summary of Canada or a province
    Vaccines {
        /// Province or territory; Canada when omitted
        region: Option<String>,
    },
    /// Vaccination chart of Canada or a province
    PlotVaccines {
        /// Province or territory; Canada when omitted
        region: Option<String>,
    },
    /// Vaccination summary of any country
    GlobalVaccines {
        /// Country name
        #[arg(default_value = "Canada")]
        country: String,
    },
    /// List every known country
    Countries,
    /// List every Canadian province and territory
    Regions,
}

impl From<CommandArg> for Command {
    fn from(arg: CommandArg) -> Self {
        match arg {
            CommandArg::Cases { country } => Self::Cases { country },
            CommandArg::RegionCases { region } => Self::RegionCases { region },
            CommandArg::PlotCases { country } => Self::PlotCases { country },
            CommandArg::PlotRegionCases { region } => Self::PlotRegionCases { region },
            CommandArg::Vaccines { region } => Self::Vaccines { region },
            CommandArg::PlotVaccines { region } => Self::PlotVaccines { region },
            CommandArg::GlobalVaccines { country } => Self::GlobalVaccines { country },
            CommandArg::Countries => Self::Countries,
            CommandArg::Regions => Self::Regions,
        }
    }
}
