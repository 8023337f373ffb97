//! Find primary schools in a city and export them as CSV
//!
//! This example demonstrates the full workflow:
//! - Configuring a finder (optionally with a fallback search API key)
//! - Running a search and inspecting the session
//! - Filtering by type and name
//! - Writing the visible subset to `<city>_schools.csv`
//!
//! Usage: `cargo run --example find_schools -- "Oslo" [type] [name]`
//!
//! Set `SERPER_API_KEY` to enable the local-search fallback.

use school_finder::{FilterCriteria, FinderConfigBuilder, SchoolFinder, TypeFilter};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    school_finder::init_logging(tracing::Level::INFO)?;

    let mut args = std::env::args().skip(1);
    let city = args.next().unwrap_or_else(|| "Oslo".to_owned());
    let type_filter: TypeFilter = args.next().as_deref().unwrap_or("all").parse()?;
    let name_query = args.next().unwrap_or_default();

    let mut builder = FinderConfigBuilder::new();
    match std::env::var("SERPER_API_KEY") {
        Ok(key) => builder = builder.fallback_api_key(key),
        Err(_) => builder = builder.fallback_enabled(false),
    }
    let finder = SchoolFinder::with_config(builder.build())?;

    let session = match finder.search_blocking(&city) {
        Ok(session) => session,
        Err(e) => {
            println!("{}", e.user_message());
            return Err(e.into());
        }
    };

    let summary = session.summary();
    println!(
        "{} schools in {} ({} public, {} private, {} unknown) via {:?}",
        session.count(),
        session.city.display_name,
        summary.public,
        summary.private,
        summary.unknown,
        session.origin
    );

    let criteria = FilterCriteria::new(type_filter, name_query);
    let visible = session.filter(&criteria);
    for (i, school) in visible.iter().enumerate() {
        println!("  {}. {} [{}]", i + 1, school.name, school.school_type);
        if !school.website.is_empty() {
            println!("     {}", school.website);
        }
        if !school.contact.is_empty() {
            println!("     Principal: {}", school.contact);
        }
    }

    let path = session.write_csv(".", &criteria, finder.config().csv_quoting)?;
    println!("Showing {} of {}, saved to {}", visible.len(), session.count(), path.display());

    Ok(())
}
