//! Terminal input for initial conditions
//!
//! Asks for the five scalars of a run in a fixed order: x and y position,
//! x and y velocity, start time

use std::io::{self, BufRead, Write};

use crate::configuration::config::InitialConfig;

const PROMPTS: [&str; 5] = [
    "Enter the initial x position (in meters): ",
    "Enter the initial y position (in meters): ",
    "Enter the initial x velocity (in meters/second): ",
    "Enter the initial y velocity (in meters/second): ",
    "Enter the initial time (in seconds): ",
];

/// Prompt on `output` and read one number per line from `input`
pub fn read_initial_conditions<R, W>(mut input: R, mut output: W) -> io::Result<InitialConfig>
where
    R: BufRead,
    W: Write,
{
    let mut values = [0.0; 5];
    for (value, prompt) in values.iter_mut().zip(PROMPTS) {
        *value = read_number(&mut input, &mut output, prompt)?;
    }

    Ok(InitialConfig {
        x: [values[0], values[1]],
        v: [values[2], values[3]],
        t0: values[4],
    })
}

/// Same as [`read_initial_conditions`] on the process's stdin/stdout
pub fn prompt_initial_conditions() -> io::Result<InitialConfig> {
    let stdin = io::stdin();
    read_initial_conditions(stdin.lock(), io::stdout())
}

fn read_number<R: BufRead, W: Write>(input: &mut R, output: &mut W, prompt: &str) -> io::Result<f64> {
    output.write_all(prompt.as_bytes())?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            format!("input closed before answering: {}", prompt.trim_end()),
        ));
    }

    let answer = line.trim();
    answer.parse::<f64>().map_err(|e| {
        io::Error::new(
            io::ErrorKind::InvalidData,
            format!("{:?} is not a number ({e}) for: {}", answer, prompt.trim_end()),
        )
    })
}
