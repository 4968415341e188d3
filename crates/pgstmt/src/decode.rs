//! Column decoding from the binary result format.
//!
//! Every column is read as raw bytes first and then decoded by its PostgreSQL
//! type. Types with no natural [`Value`] form are rendered in PostgreSQL's
//! text output format; domains decode as their base type, and anything still
//! unknown comes back as `Value::Bytes` holding the wire bytes.

use crate::error::{StmtError, StmtResult};
use crate::value::Value;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use std::error::Error;
use std::fmt::Write;
use std::net::{Ipv4Addr, Ipv6Addr};
use tokio_postgres::types::{FromSql, Kind, Type};

type BoxError = Box<dyn Error + Sync + Send>;

/// Column bytes of any type, `None` for SQL NULL.
struct Raw<'a>(Option<&'a [u8]>);

impl<'a> FromSql<'a> for Raw<'a> {
    fn from_sql(_ty: &Type, raw: &'a [u8]) -> Result<Self, BoxError> {
        Ok(Raw(Some(raw)))
    }

    fn from_sql_null(_ty: &Type) -> Result<Self, BoxError> {
        Ok(Raw(None))
    }

    fn accepts(_ty: &Type) -> bool {
        true
    }
}

/// Decode column `idx` of a driver row.
pub(crate) fn decode_column(row: &tokio_postgres::Row, idx: usize) -> StmtResult<Value> {
    let column = &row.columns()[idx];
    let fail = |e: BoxError| StmtError::decode(column.name(), e.to_string());

    match row.try_get::<_, Raw<'_>>(idx).map_err(|e| fail(e.into()))?.0 {
        None => Ok(Value::Null),
        Some(raw) => decode_value(column.type_(), raw).map_err(fail),
    }
}

/// Decode one non-null value of type `ty`.
pub(crate) fn decode_value(ty: &Type, raw: &[u8]) -> Result<Value, BoxError> {
    let value = match *ty {
        Type::BOOL => bool::from_sql(ty, raw)?.into(),
        Type::INT2 => i16::from_sql(ty, raw)?.into(),
        Type::INT4 => i32::from_sql(ty, raw)?.into(),
        Type::INT8 => i64::from_sql(ty, raw)?.into(),
        Type::OID => u32::from_sql(ty, raw)?.into(),
        Type::FLOAT4 => f32::from_sql(ty, raw)?.into(),
        Type::FLOAT8 => f64::from_sql(ty, raw)?.into(),
        Type::BYTEA => Value::Bytes(raw.to_vec()),
        Type::CHAR => Value::Text((i8::from_sql(ty, raw)? as u8 as char).to_string()),
        Type::NUMERIC => Value::Text(numeric_text(raw)?),
        Type::MONEY => Value::Text(money_text(Reader::new(raw).i64()?)),
        Type::INTERVAL => Value::Text(interval_text(raw)?),
        Type::INET | Type::CIDR => Value::Text(inet_text(raw)?),
        Type::UUID => Value::Text(uuid::Uuid::from_sql(ty, raw)?.to_string()),
        Type::DATE => match Reader::new(raw).i32()? {
            i32::MAX => Value::from("infinity"),
            i32::MIN => Value::from("-infinity"),
            _ => Value::Text(NaiveDate::from_sql(ty, raw)?.to_string()),
        },
        Type::TIME => Value::Text(NaiveTime::from_sql(ty, raw)?.to_string()),
        Type::TIMESTAMP | Type::TIMESTAMPTZ => match Reader::new(raw).i64()? {
            i64::MAX => Value::from("infinity"),
            i64::MIN => Value::from("-infinity"),
            _ if *ty == Type::TIMESTAMP => Value::Text(
                NaiveDateTime::from_sql(ty, raw)?
                    .format("%Y-%m-%d %H:%M:%S%.f")
                    .to_string(),
            ),
            _ => Value::Text(
                DateTime::<Utc>::from_sql(ty, raw)?
                    .format("%Y-%m-%d %H:%M:%S%.f%:z")
                    .to_string(),
            ),
        },
        Type::JSON | Type::JSONB => Value::Text(serde_json::Value::from_sql(ty, raw)?.to_string()),
        _ => match ty.kind() {
            Kind::Domain(base) => decode_value(base, raw)?,
            Kind::Array(element) => Value::Text(array_text(element, raw)?),
            Kind::Enum(_) => Value::Text(std::str::from_utf8(raw)?.to_string()),
            _ if <&str as FromSql>::accepts(ty) => Value::Text(std::str::from_utf8(raw)?.to_string()),
            _ => Value::Bytes(raw.to_vec()),
        },
    };
    Ok(value)
}

/// Big-endian cursor over column bytes.
struct Reader<'a> {
    buf: &'a [u8],
}

impl<'a> Reader<'a> {
    fn new(buf: &'a [u8]) -> Self {
        Self { buf }
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8], BoxError> {
        if self.buf.len() < n {
            return Err("unexpected end of column data".into());
        }
        let (head, tail) = self.buf.split_at(n);
        self.buf = tail;
        Ok(head)
    }

    fn u8(&mut self) -> Result<u8, BoxError> {
        Ok(self.take(1)?[0])
    }

    fn i16(&mut self) -> Result<i16, BoxError> {
        Ok(i16::from_be_bytes(self.take(2)?.try_into()?))
    }

    fn u16(&mut self) -> Result<u16, BoxError> {
        Ok(u16::from_be_bytes(self.take(2)?.try_into()?))
    }

    fn i32(&mut self) -> Result<i32, BoxError> {
        Ok(i32::from_be_bytes(self.take(4)?.try_into()?))
    }

    fn i64(&mut self) -> Result<i64, BoxError> {
        Ok(i64::from_be_bytes(self.take(8)?.try_into()?))
    }
}

const NUMERIC_POS: u16 = 0x0000;
const NUMERIC_NEG: u16 = 0x4000;
const NUMERIC_NAN: u16 = 0xC000;
const NUMERIC_PINF: u16 = 0xD000;
const NUMERIC_NINF: u16 = 0xF000;

/// Render `numeric` (base-10000 digit groups) at its display scale, with no
/// precision limit.
fn numeric_text(raw: &[u8]) -> Result<String, BoxError> {
    let mut r = Reader::new(raw);
    let ndigits = r.i16()?;
    let weight = i32::from(r.i16()?);
    let sign = r.u16()?;
    let dscale = usize::from(r.u16()?);
    let digits = (0..ndigits).map(|_| r.i16()).collect::<Result<Vec<_>, _>>()?;

    match sign {
        NUMERIC_NAN => return Ok("NaN".into()),
        NUMERIC_PINF => return Ok("Infinity".into()),
        NUMERIC_NINF => return Ok("-Infinity".into()),
        NUMERIC_POS | NUMERIC_NEG => {}
        other => return Err(format!("invalid numeric sign 0x{other:04x}").into()),
    }

    // digits[i] carries weight `weight - i`.
    let group = |i: i32| usize::try_from(i).ok().and_then(|i| digits.get(i)).copied().unwrap_or(0);

    let mut out = String::new();
    if sign == NUMERIC_NEG {
        out.push('-');
    }
    if weight < 0 {
        out.push('0');
    } else {
        write!(out, "{}", group(0))?;
        for i in 1..=weight {
            write!(out, "{:04}", group(i))?;
        }
    }
    if dscale > 0 {
        let mut frac = String::with_capacity(dscale + 4);
        let mut i = weight + 1;
        while frac.len() < dscale {
            write!(frac, "{:04}", group(i))?;
            i += 1;
        }
        frac.truncate(dscale);
        out.push('.');
        out.push_str(&frac);
    }
    Ok(out)
}

/// `money` is an int8 count of cents; the currency symbol depends on the
/// server's `lc_monetary` and is left off.
fn money_text(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.unsigned_abs();
    format!("{sign}{}.{:02}", abs / 100, abs % 100)
}

fn plural(n: i64, unit: &str) -> String {
    if n == 1 { format!("{n} {unit}") } else { format!("{n} {unit}s") }
}

/// Render `interval` in the `postgres` IntervalStyle.
fn interval_text(raw: &[u8]) -> Result<String, BoxError> {
    let mut r = Reader::new(raw);
    let micros = r.i64()?;
    let days = i64::from(r.i32()?);
    let months = i64::from(r.i32()?);

    let mut parts = Vec::new();
    if months / 12 != 0 {
        parts.push(plural(months / 12, "year"));
    }
    if months % 12 != 0 {
        parts.push(plural(months % 12, "mon"));
    }
    if days != 0 {
        parts.push(plural(days, "day"));
    }
    if micros != 0 || parts.is_empty() {
        let abs = micros.unsigned_abs();
        let secs = abs / 1_000_000;
        let mut time = format!(
            "{}{:02}:{:02}:{:02}",
            if micros < 0 { "-" } else { "" },
            secs / 3600,
            secs / 60 % 60,
            secs % 60
        );
        let frac = abs % 1_000_000;
        if frac != 0 {
            let digits = format!("{frac:06}");
            time.push('.');
            time.push_str(digits.trim_end_matches('0'));
        }
        parts.push(time);
    }
    Ok(parts.join(" "))
}

const PGSQL_AF_INET: u8 = 2;
const PGSQL_AF_INET6: u8 = 3;

fn inet_text(raw: &[u8]) -> Result<String, BoxError> {
    let mut r = Reader::new(raw);
    let family = r.u8()?;
    let bits = r.u8()?;
    let is_cidr = r.u8()? != 0;
    let len = usize::from(r.u8()?);
    let addr = r.take(len)?;

    let (addr, max_bits) = match family {
        PGSQL_AF_INET => (Ipv4Addr::from(<[u8; 4]>::try_from(addr)?).to_string(), 32),
        PGSQL_AF_INET6 => (Ipv6Addr::from(<[u8; 16]>::try_from(addr)?).to_string(), 128),
        other => return Err(format!("unknown inet family {other}").into()),
    };
    if is_cidr || bits != max_bits {
        Ok(format!("{addr}/{bits}"))
    } else {
        Ok(addr)
    }
}

/// Render an array in PostgreSQL's `{...}` literal form, decoding each
/// element as its own type.
fn array_text(element: &Type, raw: &[u8]) -> Result<String, BoxError> {
    let mut r = Reader::new(raw);
    let ndim = usize::try_from(r.i32()?)?;
    let _has_nulls = r.i32()?;
    let _element_oid = r.i32()?;
    let mut dims = Vec::with_capacity(ndim);
    for _ in 0..ndim {
        let len = usize::try_from(r.i32()?)?;
        let lower = r.i32()?;
        dims.push((len, lower));
    }
    if dims.is_empty() {
        return Ok("{}".into());
    }

    let mut out = String::new();
    if dims.iter().any(|&(_, lower)| lower != 1) {
        for &(len, lower) in &dims {
            write!(out, "[{lower}:{}]", i64::from(lower) + len as i64 - 1)?;
        }
        out.push('=');
    }
    write_array_level(&mut out, &mut r, element, &dims)?;
    Ok(out)
}

fn write_array_level(
    out: &mut String,
    r: &mut Reader<'_>,
    element: &Type,
    dims: &[(usize, i32)],
) -> Result<(), BoxError> {
    let Some((&(len, _), inner)) = dims.split_first() else {
        return Ok(());
    };
    out.push('{');
    for i in 0..len {
        if i > 0 {
            out.push(',');
        }
        if !inner.is_empty() {
            write_array_level(out, r, element, inner)?;
            continue;
        }
        let size = r.i32()?;
        if size < 0 {
            out.push_str("NULL");
            continue;
        }
        let value = decode_value(element, r.take(usize::try_from(size)?)?)?;
        write_array_element(out, &value);
    }
    out.push('}');
    Ok(())
}

fn write_array_element(out: &mut String, value: &Value) {
    let text = match value {
        Value::Null => return out.push_str("NULL"),
        Value::Bool(b) => return out.push(if *b { 't' } else { 'f' }),
        Value::Int(i) => return out.push_str(&i.to_string()),
        Value::Float(f) => return out.push_str(&f.to_string()),
        Value::Text(s) => s.clone(),
        Value::Bytes(b) => b.iter().fold(String::from("\\x"), |mut hex, byte| {
            let _ = write!(hex, "{byte:02x}");
            hex
        }),
    };

    let needs_quotes = text.is_empty()
        || text.eq_ignore_ascii_case("NULL")
        || text
            .chars()
            .any(|c| matches!(c, '{' | '}' | ',' | '"' | '\\') || c.is_whitespace());
    if !needs_quotes {
        out.push_str(&text);
        return;
    }
    out.push('"');
    for c in text.chars() {
        if matches!(c, '"' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('"');
}

#[cfg(test)]
mod tests;
