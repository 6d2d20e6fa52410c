//! The `termquiz sort` command.

use std::cmp::Ordering;

use anyhow::{Context, Result};

use termquiz_core::{default_compare, Eventual, Sequence};

fn directed(ordering: Ordering, reverse: bool) -> Ordering {
    if reverse {
        ordering.reverse()
    } else {
        ordering
    }
}

pub async fn execute(values: Vec<String>, numeric: bool, reverse: bool) -> Result<()> {
    let sorted: Vec<String> = if numeric {
        let numbers = values
            .into_iter()
            .map(|v| {
                let n: f64 = v
                    .trim()
                    .parse()
                    .with_context(|| format!("not a number: {v:?}"))?;
                Ok((n, v))
            })
            .collect::<Result<Sequence<(f64, String)>>>()?;

        numbers
            .sort_by(move |a, b| {
                let ordering = a
                    .0
                    .partial_cmp(&b.0)
                    .ok_or_else(|| anyhow::anyhow!("cannot compare {} and {}", a.1, b.1))?;
                Ok(Eventual::ready(directed(ordering, reverse)))
            })
            .await?
            .into_iter()
            .map(|(_, v)| v)
            .collect()
    } else {
        Sequence::from(values)
            .sort_by(move |a, b| Ok(Eventual::ready(directed(default_compare(a, b), reverse))))
            .await?
            .into_vec()
    };

    println!("{}", sorted.join(" "));
    Ok(())
}
