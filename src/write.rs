use crate::data::ModelData;
use crate::Error;

use std::io::Write;

/// Write a model in the block-export layout read by
/// [`read_blocks`](`crate::parse::read_blocks`).
///
/// Block ids start at 1. Center columns are only written when the model carries explicit
/// centers. Every number is written with the shortest representation that reads back to the
/// same `f64`.
pub fn write_blocks<W: Write>(mut writer: W, model: &ModelData<Vec<f64>>) -> Result<(), Error> {
    if model.mesh.len() != model.data.len() {
        return Err(Error::ValueCountMismatch {
            blocks: model.mesh.len(),
            values: model.data.len(),
        });
    }

    if let Some(centers) = &model.centers {
        if centers.len() != model.mesh.len() {
            return Err(Error::CenterCountMismatch {
                blocks: model.mesh.len(),
                centers: centers.len(),
            });
        }
    }

    let mut buffer = ryu::Buffer::new();
    let mut line = String::new();

    for (idx, (block, value)) in model.mesh.iter().zip(&model.data).enumerate() {
        line.clear();
        line.push_str(&(idx + 1).to_string());

        let mut push = |x: f64| {
            line.push(' ');
            line.push_str(buffer.format(x));
        };

        for corner in &block.corners {
            push(corner[0]);
            push(corner[1]);
        }

        if let Some(centers) = &model.centers {
            push(centers[idx][0]);
            push(centers[idx][1]);
        }

        push(*value);

        line.push('\n');
        writer.write_all(line.as_bytes())?;
    }

    writer.flush()?;

    Ok(())
}

/// Write a model to a file on disk
pub fn write_blocks_file<P: AsRef<std::path::Path>>(
    path: P,
    model: &ModelData<Vec<f64>>,
) -> Result<(), Error> {
    let file = std::fs::File::create(path)?;
    write_blocks(std::io::BufWriter::new(file), model)
}
