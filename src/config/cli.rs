use crate::core::promotions::Promotion;
use crate::utils::error::Result;
use crate::utils::validation::{validate_path, validate_url, Validate};
use clap::{Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "sixty-days")]
#[command(about = "Day-numbered Rust exercises: greetings, FizzBuzz, discounts, a Pokédex and a cards API")]
pub struct CliConfig {
    #[arg(long, short, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Day 1: print a greeting
    Hello {
        #[arg(long)]
        name: Option<String>,
    },

    /// Day 2: answer FizzBuzz through a channel worker
    Fizzbuzz {
        #[arg(long, default_value = "1", allow_hyphen_values = true)]
        from: i64,

        #[arg(long, default_value = "15", allow_hyphen_values = true)]
        to: i64,
    },

    /// Day 8: apply discount strategies to orders
    Discount {
        /// CSV cart (product,quantity,price). Without it the classic demo runs
        #[arg(long)]
        cart: Option<String>,

        #[arg(long, value_enum, default_value = "best")]
        promo: Promotion,

        #[arg(long, default_value = "Guest")]
        customer: String,

        #[arg(long, default_value = "0")]
        fidelity: u32,
    },

    /// Day 6: look a pokemon up on the PokéAPI
    Pokedex {
        name: String,

        /// Overrides `[pokeapi] base_url`
        #[arg(long)]
        base_url: Option<String>,

        /// TOML configuration file
        #[arg(short, long)]
        config: Option<String>,
    },

    /// Day 25: references and mutation through them
    Pointers,

    /// Days 11-13: run the cards CRUD service
    Serve {
        /// TOML configuration file
        #[arg(short, long)]
        config: Option<String>,

        /// Overrides `[server] bind`
        #[arg(long)]
        bind: Option<String>,
    },
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        match &self.command {
            Command::Discount {
                cart: Some(cart), ..
            } => validate_path("cart", cart),
            Command::Pokedex {
                base_url, config, ..
            } => {
                if let Some(url) = base_url {
                    validate_url("base_url", url)?;
                }
                if let Some(path) = config {
                    validate_path("config", path)?;
                }
                Ok(())
            }
            Command::Serve {
                config: Some(path), ..
            } => validate_path("config", path),
            _ => Ok(()),
        }
    }
}
