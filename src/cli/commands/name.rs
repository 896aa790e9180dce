//! Name command - break a location string into basename and extensions

use crate::cli::args::NameArgs;
use crate::error::ReslocResult;
use crate::names;
use crate::ui::{self, UiContext};

/// Execute the name command
pub fn execute(args: NameArgs) -> ReslocResult<()> {
    let ctx = UiContext::detect();
    let location = args.location.as_str();

    ui::key_value(&ctx, "basename", &names::basename(location, args.directory, false));
    ui::key_value(
        &ctx,
        "partial",
        &names::basename(location, args.directory, true),
    );

    // Extension queries only make sense for files
    if !args.directory {
        ui::key_value(&ctx, "extensions", &names::extensions(location).join(", "));
        ui::key_value(
            &ctx,
            "extension",
            names::extension(location).as_deref().unwrap_or(""),
        );
    }

    Ok(())
}
