//! The `termquiz range` command.

use anyhow::Result;

pub fn execute(args: Vec<i64>) -> Result<()> {
    let values = termquiz_core::range_args(&args)?;
    let line: Vec<String> = values.iter().map(i64::to_string).collect();
    println!("{}", line.join(" "));
    Ok(())
}
