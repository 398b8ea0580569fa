//! ---
//! hostsim_section: "11-simulation"
//! hostsim_subsection: "01-bootstrap"
//! hostsim_type: "source"
//! hostsim_scope: "code"
//! hostsim_description: "Output sinks for generated series."
//! hostsim_version: "v0.1.0"
//! hostsim_owner: "tbd"
//! ---
use std::io::Write;

use anyhow::{Context, Result};
use hostsim_common::OutputFormat;
use hostsim_remote::{encode_write_request, write_frame, TimeSeries, WriteRequest};

/// Serialises the series of each tick to a byte stream.
pub struct SeriesSink<W: Write> {
    format: OutputFormat,
    writer: W,
    written: u64,
}

impl<W: Write> SeriesSink<W> {
    pub fn new(format: OutputFormat, writer: W) -> Self {
        Self {
            format,
            writer,
            written: 0,
        }
    }

    /// Write one tick's worth of series. Empty ticks produce no output.
    pub fn write_tick(&mut self, series: Vec<TimeSeries>) -> Result<()> {
        if series.is_empty() {
            return Ok(());
        }
        let count = series.len() as u64;
        match self.format {
            OutputFormat::JsonLines => {
                for entry in &series {
                    serde_json::to_writer(&mut self.writer, entry)?;
                    self.writer.write_all(b"\n")?;
                }
            }
            OutputFormat::RemoteWrite => {
                let body = encode_write_request(&WriteRequest { timeseries: series })?;
                write_frame(&mut self.writer, &body)?;
            }
        }
        self.written += count;
        Ok(())
    }

    pub fn written(&self) -> u64 {
        self.written
    }

    pub fn finish(mut self) -> Result<W> {
        self.writer.flush().context("failed to flush output")?;
        Ok(self.writer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hostsim_remote::{decode_write_request, FrameReader, Label, Sample};

    fn series(n: usize) -> Vec<TimeSeries> {
        (0..n)
            .map(|i| TimeSeries {
                labels: vec![Label::new("measurement", format!("f{i}"))],
                samples: vec![Sample {
                    value: i as f64,
                    timestamp: 10,
                }],
            })
            .collect()
    }

    #[test]
    fn json_lines_writes_one_object_per_series() {
        let mut sink = SeriesSink::new(OutputFormat::JsonLines, Vec::new());
        sink.write_tick(series(3)).unwrap();
        sink.write_tick(Vec::new()).unwrap();
        assert_eq!(sink.written(), 3);
        let out = String::from_utf8(sink.finish().unwrap()).unwrap();
        let lines: Vec<_> = out.lines().collect();
        assert_eq!(lines.len(), 3);
        let parsed: TimeSeries = serde_json::from_str(lines[2]).unwrap();
        assert_eq!(parsed.label("measurement"), Some("f2"));
    }

    #[test]
    fn remote_write_frames_each_tick() {
        let mut sink = SeriesSink::new(OutputFormat::RemoteWrite, Vec::new());
        sink.write_tick(series(2)).unwrap();
        sink.write_tick(Vec::new()).unwrap();
        sink.write_tick(series(5)).unwrap();
        let out = sink.finish().unwrap();
        let sizes: Vec<usize> = FrameReader::new(out.as_slice())
            .map(|frame| decode_write_request(&frame.unwrap()).unwrap().timeseries.len())
            .collect();
        assert_eq!(sizes, vec![2, 5]);
    }
}
