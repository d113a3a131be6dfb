//! Date and time (RFC 5322 §3.3), including obsolete year forms and
//! obsolete (named/military) time zones.

use crate::text::whitespace::{cfws, fws};
use chrono::{FixedOffset, NaiveDate, NaiveTime, TimeZone};
use nom::{
    branch::alt,
    bytes::complete::{tag, tag_no_case, take_while_m_n},
    combinator::{map_opt, opt, value},
    sequence::{pair, preceded},
    IResult,
};

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// A decoded date-time, including its original UTC offset.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DateTime(pub chrono::DateTime<FixedOffset>);

/// date-time = [ day-of-week "," ] date time
///
/// ```abnf
/// date-time = [ day-of-week "," ] date time [CFWS]
/// date      = day month year
/// time      = time-of-day zone
/// ```
pub fn date_time(mixed_eol: bool, input: &[u8]) -> IResult<&[u8], DateTime> {
    let (input, _) = opt(|i| cfws(mixed_eol, i))(input)?;
    let (input, _) = opt(pair(day_name, tag(",")))(input)?;
    let (input, _) = opt(|i| fws(mixed_eol, i))(input)?;
    let (input, day) = day(mixed_eol, input)?;
    let (input, month) = month(mixed_eol, input)?;
    let (input, year) = year(mixed_eol, input)?;
    let (input, (hour, minute, second)) = time_of_day(mixed_eol, input)?;
    let (input, offset) = zone(mixed_eol, input)?;
    let (input, _) = opt(|i| cfws(mixed_eol, i))(input)?;

    let date = map_opt_result(NaiveDate::from_ymd_opt(year, month, day), input)?;
    let time = map_opt_result(
        NaiveTime::from_hms_opt(hour, minute, second.min(59)),
        input,
    )?;
    let naive = date.and_time(time);
    let dt = offset
        .from_local_datetime(&naive)
        .single()
        .ok_or_else(|| nom::Err::Error(nom::error::Error::new(input, nom::error::ErrorKind::Verify)))?;

    Ok((input, DateTime(dt)))
}

fn map_opt_result<T>(v: Option<T>, input: &[u8]) -> Result<T, nom::Err<nom::error::Error<&[u8]>>> {
    v.ok_or_else(|| nom::Err::Error(nom::error::Error::new(input, nom::error::ErrorKind::Verify)))
}

fn day_name(input: &[u8]) -> IResult<&[u8], &[u8]> {
    alt((
        tag_no_case("Mon"),
        tag_no_case("Tue"),
        tag_no_case("Wed"),
        tag_no_case("Thu"),
        tag_no_case("Fri"),
        tag_no_case("Sat"),
        tag_no_case("Sun"),
    ))(input)
}

fn integer(min_digits: usize, max_digits: usize, input: &[u8]) -> IResult<&[u8], u32> {
    let (input, digits) = take_while_m_n(min_digits, max_digits, |c: u8| c.is_ascii_digit())(input)?;
    let n = std::str::from_utf8(digits).unwrap().parse::<u32>().unwrap();
    Ok((input, n))
}

/// day = [FWS] 1*2DIGIT FWS, 1..=31.
fn day(mixed_eol: bool, input: &[u8]) -> IResult<&[u8], u32> {
    let (input, _) = opt(|i| fws(mixed_eol, i))(input)?;
    let (input, d) = map_opt(|i| integer(1, 2, i), |d| (1..=31).contains(&d).then_some(d))(input)?;
    let (input, _) = fws(mixed_eol, input)?;
    Ok((input, d))
}

fn month(mixed_eol: bool, input: &[u8]) -> IResult<&[u8], u32> {
    let (input, m) = alt((
        value(1u32, tag_no_case("Jan")),
        value(2u32, tag_no_case("Feb")),
        value(3u32, tag_no_case("Mar")),
        value(4u32, tag_no_case("Apr")),
        value(5u32, tag_no_case("May")),
        value(6u32, tag_no_case("Jun")),
        value(7u32, tag_no_case("Jul")),
        value(8u32, tag_no_case("Aug")),
        value(9u32, tag_no_case("Sep")),
        value(10u32, tag_no_case("Oct")),
        value(11u32, tag_no_case("Nov")),
        value(12u32, tag_no_case("Dec")),
    ))(input)?;
    let (input, _) = fws(mixed_eol, input)?;
    Ok((input, m))
}

/// year = 2*DIGIT / obs-year (4*DIGIT or 3DIGIT). Interpretation per RFC
/// 5322 §4.3: 2-digit 00-49 -> +2000; 2-digit 50-99 or 3-digit -> +1900;
/// 4-digit -> as-is.
fn year(mixed_eol: bool, input: &[u8]) -> IResult<&[u8], i32> {
    let (input, digits) = take_while_m_n(2, 4, |c: u8| c.is_ascii_digit())(input)?;
    let (input, _) = fws(mixed_eol, input)?;
    let raw: i32 = std::str::from_utf8(digits).unwrap().parse().unwrap();
    let y = match digits.len() {
        2 if raw <= 49 => 2000 + raw,
        2 => 1900 + raw,
        3 => 1900 + raw,
        _ => raw,
    };
    Ok((input, y))
}

/// time-of-day = hour ":" minute [ ":" second ]
fn time_of_day(mixed_eol: bool, input: &[u8]) -> IResult<&[u8], (u32, u32, u32)> {
    let (input, hour) = map_opt(|i| integer(2, 2, i), |h| (0..=23).contains(&h).then_some(h))(input)?;
    let (input, _) = tag(":")(input)?;
    let (input, minute) =
        map_opt(|i| integer(2, 2, i), |m| (0..=59).contains(&m).then_some(m))(input)?;
    let (input, second) = opt(preceded(
        tag(":"),
        map_opt(|i| integer(2, 2, i), |s| (0..=60).contains(&s).then_some(s)),
    ))(input)?;
    let (input, _) = fws(mixed_eol, input)?;
    Ok((input, (hour, minute, second.unwrap_or(0))))
}

/// zone = (("+" / "-") 4DIGIT) / obs-zone.
///
/// Obsolete named zones: UT and GMT map to 0; EST/EDT/CST/CDT/MST/MDT/
/// PST/PDT map to their standard North-American offsets. A single
/// military-alphabet letter (any of them, including the historically
/// ambiguous ones) maps to offset 0 rather than the RFC 822 letter
/// table -- RFC 5322's errata retracted the per-letter military zone
/// table because it was never implemented consistently in the wild, so
/// this crate follows that guidance rather than the stricter table.
/// An unrecognized name also falls back to 0.
fn zone(mixed_eol: bool, input: &[u8]) -> IResult<&[u8], FixedOffset> {
    let (input, _) = opt(|i| fws(mixed_eol, i))(input)?;
    alt((numeric_zone, named_zone))(input)
}

/// Numeric zone, bounded to the real-world offset range RFC 5322 §4.3
/// describes (-12:00..+14:00), mirroring the original decoder's
/// `ReadInteger(2, 0, maxOffset)` / `ReadInteger(2, 0, 59)` checks.
fn numeric_zone(input: &[u8]) -> IResult<&[u8], FixedOffset> {
    let (input, sign) = alt((value(1i32, tag("+")), value(-1i32, tag("-"))))(input)?;
    let max_hour = if sign < 0 { 12 } else { 14 };
    let (input, hh) = map_opt(|i| integer(2, 2, i), |h| (0..=max_hour).contains(&h).then_some(h))(input)?;
    let (input, mm) = map_opt(|i| integer(2, 2, i), |m| (0..=59).contains(&m).then_some(m))(input)?;
    let secs = sign * (hh as i32 * 3600 + mm as i32 * 60);
    let offset = FixedOffset::east_opt(secs)
        .ok_or_else(|| nom::Err::Error(nom::error::Error::new(input, nom::error::ErrorKind::Verify)))?;
    Ok((input, offset))
}

fn named_zone(input: &[u8]) -> IResult<&[u8], FixedOffset> {
    let (input, name) = take_while_m_n(1, 3, |c: u8| c.is_ascii_alphabetic())(input)?;
    let upper = String::from_utf8_lossy(name).to_ascii_uppercase();
    let hours: i32 = match upper.as_str() {
        "UT" | "GMT" => 0,
        "EST" => -5,
        "EDT" => -4,
        "CST" => -6,
        "CDT" => -5,
        "MST" => -7,
        "MDT" => -6,
        "PST" => -8,
        "PDT" => -7,
        _ if upper.len() == 1 => 0,
        _ => 0,
    };
    Ok((input, FixedOffset::east_opt(hours * 3600).unwrap()))
}

pub fn write_date_time(out: &mut String, dt: &DateTime) {
    out.push_str(&dt.0.format("%a, %d %b %Y %H:%M:%S %z").to_string());
}
