// src/simulation/output.rs

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::math::error::SimError;

/// 1ステップ分の出力レコードを受け取る出力先
pub trait RecordSink {
    /// レコードを1行追加する
    fn append(&mut self, fields: &[f64]) -> Result<(), SimError>;

    /// バッファを書き出す
    fn flush(&mut self) -> Result<(), SimError> {
        Ok(())
    }
}

/// 単一振動子のレコード (t, x, v, x_analytical)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OscillatorRecord {
    pub t: f64,
    pub x: f64,
    pub v: f64,
    pub analytical: f64,
}

impl OscillatorRecord {
    pub fn fields(&self) -> [f64; 4] {
        [self.t, self.x, self.v, self.analytical]
    }

    pub fn from_fields(fields: &[f64]) -> Option<Self> {
        match fields {
            [t, x, v, analytical] => Some(OscillatorRecord {
                t: *t,
                x: *x,
                v: *v,
                analytical: *analytical,
            }),
            _ => None,
        }
    }
}

/// チェーンのレコード
#[derive(Debug, Clone, PartialEq)]
pub enum ChainRecord {
    /// 末端粒子のみ (t, x_last, v_last)
    Last { t: f64, x: f64, v: f64 },
    /// 全粒子の位置 (t, x_0, …, x_{N-1})
    All { t: f64, positions: Vec<f64> },
}

impl ChainRecord {
    pub fn fields(&self) -> Vec<f64> {
        match self {
            ChainRecord::Last { t, x, v } => vec![*t, *x, *v],
            ChainRecord::All { t, positions } => {
                let mut fields = Vec::with_capacity(positions.len() + 1);
                fields.push(*t);
                fields.extend_from_slice(positions);
                fields
            }
        }
    }
}

/// タブ区切り・小数点以下8桁のテキスト出力
pub struct TextSink<W: Write> {
    writer: W,
    line: String,
}

impl<W: Write> TextSink<W> {
    pub fn new(writer: W) -> Self {
        TextSink {
            writer,
            line: String::new(),
        }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl TextSink<BufWriter<File>> {
    /// 出力ファイルを作成する（親ディレクトリがなければ作成する）
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self, SimError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let file = File::create(path)?;
        Ok(TextSink::new(BufWriter::new(file)))
    }
}

/// 1行分の文字列を作成する
pub fn format_row(fields: &[f64], line: &mut String) {
    line.clear();
    for (i, value) in fields.iter().enumerate() {
        if i > 0 {
            line.push('\t');
        }
        line.push_str(&format!("{:.8}", value));
    }
    line.push('\n');
}

impl<W: Write> RecordSink for TextSink<W> {
    fn append(&mut self, fields: &[f64]) -> Result<(), SimError> {
        format_row(fields, &mut self.line);
        self.writer.write_all(self.line.as_bytes())?;
        Ok(())
    }

    fn flush(&mut self) -> Result<(), SimError> {
        self.writer.flush()?;
        Ok(())
    }
}

/// 全レコードをメモリ上に保持する出力先
#[derive(Debug, Default, Clone, PartialEq)]
pub struct MemorySink {
    pub rows: Vec<Vec<f64>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// 単一振動子のレコードとして読み出す（4列でない行は除く）
    pub fn oscillator_records(&self) -> Vec<OscillatorRecord> {
        self.rows
            .iter()
            .filter_map(|row| OscillatorRecord::from_fields(row))
            .collect()
    }
}

impl RecordSink for MemorySink {
    fn append(&mut self, fields: &[f64]) -> Result<(), SimError> {
        self.rows.push(fields.to_vec());
        Ok(())
    }
}
