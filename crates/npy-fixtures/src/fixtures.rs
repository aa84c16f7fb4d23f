use std::fs;

use crate::prelude::*;

/// values every fixture holds
pub static FIXTURE_VALUES: [i64; 5] = [1, 2, 3, 4, 5];

/// one fixture file
#[derive(Clone, Copy, Debug)]
pub struct Fixture {
    pub fname: &'static str,
    pub element_type: ElementType,
}

pub static FIXTURES: [Fixture; 4] = [
    Fixture { fname: "npy-double.npy", element_type: ElementType::Float64 },
    Fixture { fname: "npy-float.npy", element_type: ElementType::Float32 },
    Fixture { fname: "npy-long.npy", element_type: ElementType::Int64 },
    Fixture { fname: "npy-int.npy", element_type: ElementType::Int32 },
];

pub fn create_dir_if_not_exist(out_dir: &Path) -> Result<()> {
    if !out_dir.exists() {
        info!("creating {}", out_dir.display());
        fs::create_dir_all(out_dir)?;
    }
    Ok(())
}

/// Writes every fixture into `out_dir`, returning the paths written.
pub fn write_fixtures(out_dir: &Path) -> Result<Vec<PathBuf>> {
    create_dir_if_not_exist(out_dir)?;

    let values: Vec<Number> = FIXTURE_VALUES.iter().map(|&v| Number::Int(v)).collect();
    let shape = [values.len()];

    let mut written = Vec::with_capacity(FIXTURES.len());
    for fixture in FIXTURES.iter() {
        let path = out_dir.join(fixture.fname);
        debug!("{} <- {}", path.display(), fixture.element_type);
        npy_core::save(&path, &values, fixture.element_type, &shape)?;
        written.push(path);
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempdir::TempDir;

    #[test]
    fn should_write_four_fixtures() {
        let dir = TempDir::new("fixtures").unwrap();
        let written = write_fixtures(dir.path()).unwrap();
        assert_eq!(written.len(), 4);

        let sizes: Vec<(String, u64)> = written
            .iter()
            .map(|p| {
                let name = p.file_name().unwrap().to_str().unwrap().to_owned();
                (name, fs::metadata(p).unwrap().len())
            })
            .collect();
        assert_eq!(
            sizes,
            vec![
                ("npy-double.npy".to_owned(), 168),
                ("npy-float.npy".to_owned(), 148),
                ("npy-long.npy".to_owned(), 168),
                ("npy-int.npy".to_owned(), 148),
            ]
        );
    }

    #[test]
    fn should_create_missing_folder() {
        let dir = TempDir::new("fixtures").unwrap();
        let out_dir = dir.path().join("a").join("b");
        write_fixtures(&out_dir).unwrap();
        assert!(out_dir.join("npy-int.npy").exists());
    }

    #[test]
    fn should_write_numpy_bytes() {
        let dir = TempDir::new("fixtures").unwrap();
        write_fixtures(dir.path()).unwrap();

        let bytes = fs::read(dir.path().join("npy-int.npy")).unwrap();
        assert_eq!(&bytes[..8], b"\x93NUMPY\x01\x00");
        let text = std::str::from_utf8(&bytes[10..128]).unwrap();
        assert!(text.starts_with("{'descr': '<i4', 'fortran_order': False, 'shape': (5,), }"));
        assert_eq!(&bytes[128..132], &1i32.to_le_bytes());
        assert_eq!(&bytes[144..148], &5i32.to_le_bytes());
    }
}
