use crate::prelude::*;

/// Parses one value. Integers stay integers, everything else must be a float.
pub fn parse_number(s: &str) -> Result<Number> {
    let s = s.trim();
    if let Ok(i) = s.parse::<i64>() {
        return Ok(Number::Int(i));
    }
    if let Ok(u) = s.parse::<u64>() {
        return Ok(Number::UInt(u));
    }
    s.parse::<f64>()
        .map(Number::Float)
        .map_err(|_| format!("not a number: {:?}", s).into())
}

/// comma separated values, e.g. `1,2,3.5`
pub fn parse_values(s: &str) -> Result<Vec<Number>> {
    s.split(',')
        .filter(|v| !v.trim().is_empty())
        .map(parse_number)
        .collect()
}

/// Comma separated dimensions, python style: `5`, `5,` and `2,3` are all
/// accepted.
pub fn parse_shape(s: &str) -> Result<Vec<usize>> {
    let dims = s
        .trim()
        .trim_start_matches('(')
        .trim_end_matches(')')
        .split(',')
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .map(|d| d.parse::<usize>().map_err(|_| format!("bad dimension: {:?}", d).into()))
        .collect::<Result<Vec<usize>>>()?;
    if dims.is_empty() {
        return Err(format!("empty shape: {:?}", s).into());
    }
    Ok(dims)
}
