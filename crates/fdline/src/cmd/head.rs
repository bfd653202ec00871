use std::fs::File;
use std::os::fd::AsRawFd;
use std::path::Path;

use fdline_reader::{global, LineConfig, NextLine, RawDescriptor};
use tracing::debug;

use crate::cmd::HeadArgs;
use crate::exit::{config_error, io_error, line_error, CliError, CliResult, SUCCESS, USAGE};
use crate::output::{LinePrinter, OutputFormat};

struct Input {
    label: String,
    fd: RawDescriptor,
    // Keeps the descriptor open; `None` for standard input.
    _file: Option<File>,
    index: usize,
    done: bool,
}

pub fn run(args: HeadArgs, format: OutputFormat) -> CliResult<i32> {
    if let Some(chunk_size) = args.chunk_size {
        global::configure(LineConfig::with_chunk_size(chunk_size))
            .map_err(|err| config_error("invalid chunk size", err))?;
    }

    let stdin_uses = args.paths.iter().filter(|p| is_stdin(p)).count();
    if stdin_uses > 1 {
        return Err(CliError::new(USAGE, "standard input can only be listed once"));
    }

    let mut inputs = args
        .paths
        .iter()
        .map(|path| open_input(path))
        .collect::<CliResult<Vec<_>>>()?;
    let mut printer = LinePrinter::new(format, inputs.len() > 1);

    for _ in 0..args.count {
        let mut progressed = false;
        for input in inputs.iter_mut().filter(|input| !input.done) {
            progressed = true;
            input.index += 1;
            match global::next_line(input.fd) {
                Ok(NextLine::Line(line)) => printer.line(&input.label, input.index, &line),
                Ok(NextLine::EndOfStream) => {
                    printer.end_of_stream(&input.label, input.index);
                    input.done = true;
                }
                Err(err) => {
                    printer.finish();
                    return Err(line_error(&format!("read {} failed", input.label), err));
                }
            }
        }
        if !progressed {
            break;
        }
    }
    printer.finish();

    // Descriptor numbers are reused once the files close.
    for input in &inputs {
        let _ = global::reset(input.fd);
    }

    Ok(SUCCESS)
}

fn is_stdin(path: &Path) -> bool {
    path == Path::new("-")
}

fn open_input(path: &Path) -> CliResult<Input> {
    if is_stdin(path) {
        return Ok(Input {
            label: "-".to_string(),
            fd: std::io::stdin().as_raw_fd(),
            _file: None,
            index: 0,
            done: false,
        });
    }

    let file = File::open(path)
        .map_err(|err| io_error(&format!("open {} failed", path.display()), err))?;
    let fd = file.as_raw_fd();
    debug!(path = %path.display(), fd, "opened input");

    Ok(Input {
        label: path.display().to_string(),
        fd,
        _file: Some(file),
        index: 0,
        done: false,
    })
}
