use std::fs;
use std::path::PathBuf;

use miette::{IntoDiagnostic, Result, WrapErr, miette};
use time::Date;
use unpress_convert::{ConvertOptions, Converter};
use unpress_export::models::DATE_FORMAT;
use unpress_export::{Channel, PostFilter};

use crate::cli::ConvertArgs;
use crate::config::Settings;

pub fn run(args: ConvertArgs, settings: &Settings) -> Result<()> {
    let xml = fs::read_to_string(&args.export)
        .into_diagnostic()
        .wrap_err_with(|| format!("failed to read export file {}", args.export.display()))?;
    let channel = Channel::parse(&xml).map_err(|e| miette!("{}", &*e))?;
    if channel.malformed_items > 0 {
        eprintln!("Skipped {} malformed item(s) in the export.", channel.malformed_items);
    }

    let mut filter = PostFilter::new();
    if !args.post_ids.is_empty() {
        filter = filter.with_ids(args.post_ids.iter().cloned());
    }
    if let Some(after) = &args.after {
        filter = filter.published_after(parse_date(after)?);
    }
    if let Some(before) = &args.before {
        filter = filter.published_before(parse_date(before)?);
    }

    let output_dir =
        args.output.clone().or_else(|| settings.output_dir.clone()).unwrap_or_else(|| PathBuf::from("_posts"));
    // The images tree sits next to the posts directory unless told otherwise.
    let images_root = args.images.clone().or_else(|| settings.images_dir.clone()).unwrap_or_else(|| {
        match output_dir.parent() {
            Some(parent) => parent.join("images"),
            None => PathBuf::from("images"),
        }
    });

    let mut options = ConvertOptions::new(&args.media, &output_dir, &images_root);
    if let Some(hosts) = &settings.media_hosts {
        options.media_hosts = hosts.clone();
    }
    if let Some(offset) = &settings.utc_offset {
        options.utc_offset = offset.clone();
    }
    options.markdown = args.markdown || settings.markdown.unwrap_or(false);

    let converter = Converter::new(options).map_err(|e| miette!("{}", &*e))?;
    let report = converter.run(&channel, &filter);

    println!("Conversion complete. Processed {} of {} posts.", report.converted, report.total);
    if report.filtered > 0 {
        println!("{} post(s) excluded by filters.", report.filtered);
    }
    if report.failed > 0 {
        println!("{} post(s) failed to convert; see diagnostics above.", report.failed);
    }
    println!("Posts saved to {}", output_dir.display());
    Ok(())
}

fn parse_date(raw: &str) -> Result<Date> {
    Date::parse(raw, &DATE_FORMAT).into_diagnostic().wrap_err_with(|| format!("invalid date filter: {raw}"))
}
