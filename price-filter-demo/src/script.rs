use std::str::FromStr;

use anyhow::{Context, Result, anyhow, bail};

/// One step of a scripted single-finger gesture. Offsets are screen x.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Step {
    Down(f32),
    Move(f32),
    Up,
}

/// Whitespace-separated steps such as `down:120 move:150 up`.
#[derive(Debug, Clone, PartialEq)]
pub struct TouchScript {
    pub steps: Vec<Step>,
}

impl FromStr for TouchScript {
    type Err = anyhow::Error;

    fn from_str(source: &str) -> Result<Self> {
        let steps = source
            .split_whitespace()
            .map(parse_step)
            .collect::<Result<Vec<_>>>()?;
        validate(&steps)?;
        Ok(Self { steps })
    }
}

fn parse_step(token: &str) -> Result<Step> {
    let (kind, x) = match token.split_once(':') {
        Some((kind, x)) => (kind, Some(x)),
        None => (token, None),
    };
    let offset = || -> Result<f32> {
        let x = x.ok_or_else(|| anyhow!("`{token}` is missing an x offset"))?;
        x.parse()
            .with_context(|| format!("invalid x offset in `{token}`"))
    };
    match kind {
        "down" => Ok(Step::Down(offset()?)),
        "move" => Ok(Step::Move(offset()?)),
        "up" if x.is_none() => Ok(Step::Up),
        "up" => bail!("`up` takes no offset"),
        other => bail!("unknown step `{other}`"),
    }
}

fn validate(steps: &[Step]) -> Result<()> {
    let mut touching = false;
    for step in steps {
        match (step, touching) {
            (Step::Down(_), false) => touching = true,
            (Step::Down(_), true) => bail!("`down` while the finger is already down"),
            (Step::Move(_), false) => bail!("`move` before `down`"),
            (Step::Up, false) => bail!("`up` before `down`"),
            (Step::Up, true) => touching = false,
            (Step::Move(_), true) => {}
        }
    }
    if touching {
        bail!("script ends with the finger still down");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_drag() {
        let script: TouchScript = "down:120 move:150.5 up".parse().unwrap();
        assert_eq!(
            script.steps,
            vec![Step::Down(120.0), Step::Move(150.5), Step::Up]
        );
    }

    #[test]
    fn allows_repeated_gestures() {
        let script: TouchScript = "down:10 up down:300 move:200 up".parse().unwrap();
        assert_eq!(script.steps.len(), 5);
    }

    #[test]
    fn rejects_malformed_steps() {
        assert!("down up".parse::<TouchScript>().is_err());
        assert!("down:abc up".parse::<TouchScript>().is_err());
        assert!("tap:10".parse::<TouchScript>().is_err());
        assert!("up:3".parse::<TouchScript>().is_err());
    }

    #[test]
    fn rejects_unbalanced_scripts() {
        assert!("move:10".parse::<TouchScript>().is_err());
        assert!("down:10 down:20 up".parse::<TouchScript>().is_err());
        assert!("down:10 move:20".parse::<TouchScript>().is_err());
    }
}
