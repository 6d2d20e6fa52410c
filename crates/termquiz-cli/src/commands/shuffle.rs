//! The `termquiz shuffle` command.

use anyhow::Result;
use rand::rngs::StdRng;
use rand::SeedableRng;

use termquiz_core::Sequence;

pub fn execute(values: Vec<String>, seed: Option<u64>) -> Result<()> {
    let mut seq = Sequence::from(values);
    match seed {
        Some(seed) => seq.shuffle_with(&mut StdRng::seed_from_u64(seed)),
        None => seq.shuffle(),
    };
    println!("{}", seq.into_vec().join(" "));
    Ok(())
}
