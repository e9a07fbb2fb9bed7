use std::fs;

use miette::{IntoDiagnostic, Result, WrapErr, miette};
use unpress_convert::count_image_refs;
use unpress_export::Channel;

use crate::cli::ListArgs;

pub fn run(args: ListArgs) -> Result<()> {
    let xml = fs::read_to_string(&args.export)
        .into_diagnostic()
        .wrap_err_with(|| format!("failed to read export file {}", args.export.display()))?;
    let channel = Channel::parse(&xml).map_err(|e| miette!("{}", &*e))?;

    let mut posts: Vec<_> = channel.posts.iter().filter(|post| post.is_published()).collect();
    // Newest first.
    posts.sort_by(|a, b| b.date.cmp(&a.date));

    let rule = "-".repeat(80);
    println!("Found {} posts:", posts.len());
    println!("{rule}");
    for post in posts {
        println!("{}\t{}\t{} ({} images)", post.id, post.date.date(), post.title, count_image_refs(&post.content));
        println!("  Categories: {}", post.categories.join(", "));
        println!("  Tags: {}", post.tags.join(", "));
        if let Some(link) = &post.link {
            println!("  URL: {link}");
        }
        println!("{rule}");
    }
    Ok(())
}
