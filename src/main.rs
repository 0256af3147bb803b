use clap::{Parser, Subcommand};
use focal_point::filter::{FilterSpec, TagPresence};
use focal_point::metadata::ExifMetadataReader;
use focal_point::session::Session;
use focal_point::{config, export, filter, output, scan};
use std::collections::BTreeSet;
use std::path::PathBuf;

/// Filter flags shared by commands that narrow the collection.
#[derive(clap::Args, Clone)]
struct FilterArgs {
    /// Keep records where some tag contains this text (case-insensitive)
    #[arg(long)]
    tag: Option<String>,

    /// Start of the capture-date range, YYYY-MM-DD (inclusive)
    #[arg(long, requires = "to_date")]
    from_date: Option<String>,

    /// End of the capture-date range, YYYY-MM-DD (inclusive)
    #[arg(long, requires = "from_date")]
    to_date: Option<String>,

    /// Start of the capture-time range, HH:MM (inclusive)
    #[arg(long, requires = "to_time")]
    from_time: Option<String>,

    /// End of the capture-time range, HH:MM (inclusive)
    #[arg(long, requires = "from_time")]
    to_time: Option<String>,

    /// Keep records captured at this exact location (repeatable)
    #[arg(long)]
    location: Vec<String>,

    /// Keep only records with at least one tag
    #[arg(long, conflicts_with = "only_untagged")]
    only_tagged: bool,

    /// Keep only records with no tags
    #[arg(long)]
    only_untagged: bool,
}

impl FilterArgs {
    /// Build a [`FilterSpec`] from the raw flags.
    ///
    /// Date/time strings are validated here so a typo'd range is a usage
    /// error up front, not a silently empty listing.
    fn to_spec(&self) -> Result<FilterSpec, String> {
        let date_range = match (&self.from_date, &self.to_date) {
            (Some(from), Some(to)) => Some((parse_date(from)?, parse_date(to)?)),
            _ => None,
        };
        let time_range = match (&self.from_time, &self.to_time) {
            (Some(from), Some(to)) => Some((parse_time(from)?, parse_time(to)?)),
            _ => None,
        };

        // clap already rejects the both-set combination
        let presence = if self.only_tagged {
            TagPresence::TaggedOnly
        } else if self.only_untagged {
            TagPresence::UntaggedOnly
        } else {
            TagPresence::Any
        };

        Ok(FilterSpec {
            tag_substring: self.tag.clone(),
            date_range,
            time_range,
            locations: self.location.iter().cloned().collect::<BTreeSet<_>>(),
            presence,
        })
    }
}

fn parse_date(s: &str) -> Result<chrono::NaiveDate, String> {
    chrono::NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| format!("invalid date '{s}', expected YYYY-MM-DD"))
}

fn parse_time(s: &str) -> Result<chrono::NaiveTime, String> {
    chrono::NaiveTime::parse_from_str(s, "%H:%M")
        .or_else(|_| chrono::NaiveTime::parse_from_str(s, "%H:%M:%S"))
        .map_err(|_| format!("invalid time '{s}', expected HH:MM"))
}

#[derive(Parser)]
#[command(name = "focal-point")]
#[command(about = "Browse, tag, and filter wildlife camera images")]
#[command(long_about = "\
Browse, tag, and filter wildlife camera images

A session is one directory's worth of images plus your tag assignments:

  focal-point scan --source trail-cams/     # load images, read EXIF
  focal-point list --only-untagged          # what still needs tagging?
  focal-point tag add 3 deer dusk           # tag image 003
  focal-point tag bulk fox --ids 4,7,9      # tag a selection at once
  focal-point export                        # write wildlife_tags.json

Rescanning replaces the whole session; tags live in the session file until
exported. Missing EXIF values show as \"Unknown\" and fail any date/time
range filter you set.")]
#[command(version)]
struct Cli {
    /// Directory of images to work with
    #[arg(long, default_value = ".", global = true)]
    source: PathBuf,

    /// Session manifest file
    #[arg(long, default_value = ".focal-point/session.json", global = true)]
    session: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Load all images from the source directory into a fresh session
    Scan,
    /// Show the (optionally filtered) collection, one grid page at a time
    List {
        #[command(flatten)]
        filters: FilterArgs,
        /// Grid page to show (1-based)
        #[arg(long, default_value_t = 1)]
        page: usize,
    },
    /// Show the full metadata card for one image
    Show {
        /// Record id from the current session
        id: u32,
        /// Also print a data: URI with the encoded image bytes
        #[arg(long)]
        uri: bool,
    },
    /// Add, remove, or bulk-apply tags
    Tag {
        #[command(subcommand)]
        action: TagAction,
    },
    /// Write the tag-assignment document
    Export {
        /// Output file (default: export.filename from config.toml)
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// Print a stock config.toml with all options documented
    GenConfig,
}

#[derive(Subcommand)]
enum TagAction {
    /// Attach one or more tags to an image
    Add { id: u32, tags: Vec<String> },
    /// Remove a tag from an image
    Remove { id: u32, tag: String },
    /// Apply one tag to several images
    Bulk {
        tag: String,
        /// Record ids, comma-separated
        #[arg(long, value_delimiter = ',', required = true)]
        ids: Vec<u32>,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Scan => {
            let (tx, rx) = std::sync::mpsc::channel();
            let printer = std::thread::spawn(move || {
                for event in rx {
                    println!("{}", output::format_load_event(&event));
                }
            });

            let session = scan::load_directory(&cli.source, &ExifMetadataReader, Some(tx));
            printer.join().ok();

            session.save(&cli.session)?;
            output::print_scan_output(&session);
        }
        Command::List { filters, page } => {
            let session = Session::load(&cli.session)?;
            // Config lives next to the images, wherever the session was scanned
            let config = config::load_config(&session.source)?;
            let spec = filters.to_spec()?;

            let matched = filter::filter(&session.records, &spec);
            let page_records = filter::page(&matched, page, config.grid.per_page);
            output::print_list_output(&page_records, matched.len(), session.records.len(), page);
        }
        Command::Show { id, uri } => {
            let session = Session::load(&cli.session)?;
            let record = session
                .record(id)
                .ok_or_else(|| format!("no image with id {id} in the current session"))?;
            output::print_record_detail(record);
            if uri {
                println!("{}", record.display_uri(&session.source)?);
            }
        }
        Command::Tag { action } => {
            let mut session = Session::load(&cli.session)?;
            match action {
                TagAction::Add { id, tags } => {
                    for tag in &tags {
                        if session.add_tag(id, tag)? {
                            println!("Tagged {:0>3} with '{}'", id, tag.trim());
                        } else {
                            println!("{:0>3} already tagged '{}'", id, tag.trim());
                        }
                    }
                }
                TagAction::Remove { id, tag } => {
                    if session.remove_tag(id, &tag)? {
                        println!("Removed '{}' from {:0>3}", tag, id);
                    } else {
                        println!("{:0>3} has no tag '{}'", id, tag);
                    }
                }
                TagAction::Bulk { tag, ids } => {
                    let added = session.bulk_tag(&ids, &tag)?;
                    println!("Tagged {} of {} images with '{}'", added, ids.len(), tag.trim());
                }
            }
            session.save(&cli.session)?;
        }
        Command::Export { output } => {
            let session = Session::load(&cli.session)?;
            let config = config::load_config(&session.source)?;
            let path = output.unwrap_or_else(|| PathBuf::from(&config.export.filename));
            export::write_export(&session.records, &path)?;
            println!(
                "Exported {} tag assignments to {}",
                session.records.len(),
                path.display()
            );
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}
