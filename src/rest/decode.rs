//! Shape decoders for the `result` payload of each endpoint.
//!
//! The API returns a different JSON shape per endpoint: plain objects, lists of
//! positional tuples, or maps of those. Each decoder walks the untyped
//! [`Value`] with explicit shape checks and fails with
//! [`CryptowatchError::Shape`] naming the endpoint and the path of the first
//! offending element. Nothing is coerced or zero-filled, and lists are never
//! cut short.

use serde_json::{Map, Value};
use time::OffsetDateTime;

use crate::error::CryptowatchError;
use crate::rest::Endpoint;
use crate::rest::public::{
    Book, Change, MarketsPrices, MarketsSummaries, Ohlc, OhlcSummary, OrderBook, Price, Summary,
    Trade,
};
use crate::types::Market;

type Result<T> = std::result::Result<T, CryptowatchError>;

/// Decode `{"price": number}`.
pub fn decode_price(result: &Value) -> Result<f64> {
    let ep = Endpoint::Price;
    let obj = object(ep, "", result)?;
    number(ep, "price", field(ep, "", obj, "price")?)
}

/// Decode a summary object.
pub fn decode_summary(result: &Value) -> Result<Summary> {
    summary(Endpoint::Summary, "", result)
}

/// Decode a list of `[id, timestamp, price, amount]` tuples.
pub fn decode_trades(result: &Value) -> Result<Vec<Trade>> {
    let ep = Endpoint::Trades;
    let items = array(ep, "trades", result)?;
    let mut trades = Vec::with_capacity(items.len());
    for (i, item) in items.iter().enumerate() {
        let path = format!("trades[{}]", i);
        let [id, timestamp, price, amount] = tuple::<4>(ep, &path, item)?;
        let timestamp = integral(ep, &format!("{}[1]", path), timestamp)?;
        trades.push(Trade {
            id: integral(ep, &format!("{}[0]", path), id)?,
            timestamp,
            time: unix_time(ep, &format!("{}[1]", path), timestamp)?,
            price: number(ep, &format!("{}[2]", path), price)?,
            amount: number(ep, &format!("{}[3]", path), amount)?,
        });
    }
    Ok(trades)
}

/// Decode `{"asks": [[price, amount], ...], "bids": [...]}`.
pub fn decode_order_book(result: &Value) -> Result<OrderBook> {
    let ep = Endpoint::OrderBook;
    let obj = object(ep, "", result)?;
    Ok(OrderBook {
        asks: book_side(ep, "asks", field(ep, "", obj, "asks")?)?,
        bids: book_side(ep, "bids", field(ep, "", obj, "bids")?)?,
    })
}

/// Decode a map from period to candle tuples.
///
/// Candles are `[close_time, open, high, low, close, volume]`, optionally
/// followed by the quote volume.
pub fn decode_ohlc(result: &Value) -> Result<Ohlc> {
    let ep = Endpoint::Ohlc;
    let obj = object(ep, "", result)?;
    let mut ohlc = Ohlc::with_capacity(obj.len());
    for (period, candles) in obj {
        let items = array(ep, period, candles)?;
        let mut summaries = Vec::with_capacity(items.len());
        for (i, item) in items.iter().enumerate() {
            let path = format!("{}[{}]", period, i);
            summaries.push(candle(ep, &path, item)?);
        }
        ohlc.insert(period.clone(), summaries);
    }
    Ok(ohlc)
}

/// Decode the list of market descriptors.
///
/// Each descriptor must carry `exchange` and `pair` strings; `currencyPair` is
/// accepted in place of `pair`. Other descriptor fields are ignored.
pub fn decode_markets(result: &Value) -> Result<Vec<Market>> {
    let ep = Endpoint::Markets;
    let items = array(ep, "markets", result)?;
    items
        .iter()
        .enumerate()
        .map(|(i, item)| -> Result<Market> {
            let path = format!("markets[{}]", i);
            let obj = object(ep, &path, item)?;
            let exchange = string(
                ep,
                &child(&path, "exchange"),
                field(ep, &path, obj, "exchange")?,
            )?;
            let pair = match obj.get("pair") {
                Some(v) => string(ep, &child(&path, "pair"), v)?,
                None => string(
                    ep,
                    &child(&path, "currencyPair"),
                    field(ep, &path, obj, "currencyPair")?,
                )?,
            };
            Ok(Market::new(exchange, pair))
        })
        .collect()
}

/// Decode a map from market symbol to price.
pub fn decode_markets_prices(result: &Value) -> Result<MarketsPrices> {
    let ep = Endpoint::MarketsPrices;
    let obj = object(ep, "", result)?;
    obj.iter()
        .map(|(symbol, price)| -> Result<(String, f64)> {
            Ok((symbol.clone(), number(ep, symbol, price)?))
        })
        .collect()
}

/// Decode a map from market symbol to summary object.
pub fn decode_markets_summaries(result: &Value) -> Result<MarketsSummaries> {
    let ep = Endpoint::MarketsSummaries;
    let obj = object(ep, "", result)?;
    obj.iter()
        .map(|(symbol, value)| -> Result<(String, Summary)> {
            Ok((symbol.clone(), summary(ep, symbol, value)?))
        })
        .collect()
}

fn summary(ep: Endpoint, path: &str, value: &Value) -> Result<Summary> {
    let obj = object(ep, path, value)?;

    let price_path = child(path, "price");
    let price = object(ep, &price_path, field(ep, path, obj, "price")?)?;

    let change_path = child(&price_path, "change");
    let change = object(ep, &change_path, field(ep, &price_path, price, "change")?)?;

    let num = |parent: &str, map: &Map<String, Value>, key: &str| -> Result<f64> {
        number(ep, &child(parent, key), field(ep, parent, map, key)?)
    };

    let volume_quote = match obj.get("volumeQuote") {
        None | Some(Value::Null) => None,
        Some(v) => Some(number(ep, &child(path, "volumeQuote"), v)?),
    };

    Ok(Summary {
        price: Price {
            last: num(&price_path, price, "last")?,
            high: num(&price_path, price, "high")?,
            low: num(&price_path, price, "low")?,
            change: Change {
                percentage: num(&change_path, change, "percentage")?,
                absolute: num(&change_path, change, "absolute")?,
            },
        },
        volume: num(path, obj, "volume")?,
        volume_quote,
    })
}

fn book_side(ep: Endpoint, side: &str, value: &Value) -> Result<Vec<Book>> {
    let items = array(ep, side, value)?;
    let mut books = Vec::with_capacity(items.len());
    for (i, item) in items.iter().enumerate() {
        let path = format!("{}[{}]", side, i);
        let [price, amount] = tuple::<2>(ep, &path, item)?;
        books.push(Book {
            price: number(ep, &format!("{}[0]", path), price)?,
            amount: number(ep, &format!("{}[1]", path), amount)?,
        });
    }
    Ok(books)
}

fn candle(ep: Endpoint, path: &str, value: &Value) -> Result<OhlcSummary> {
    let items = array(ep, path, value)?;
    let (head, quote_volume) = match items.as_slice() {
        [head @ .., quote] if items.len() == 7 => {
            (head, Some(number(ep, &format!("{}[6]", path), quote)?))
        }
        head if head.len() == 6 => (head, None),
        _ => {
            return Err(fail(
                ep,
                path,
                format!("expected 6 or 7 elements, got {}", items.len()),
            ));
        }
    };
    let at = |i: usize| number(ep, &format!("{}[{}]", path, i), &head[i]);

    let close_timestamp = integral(ep, &format!("{}[0]", path), &head[0])?;
    Ok(OhlcSummary {
        close_timestamp,
        close_time: unix_time(ep, &format!("{}[0]", path), close_timestamp)?,
        open_price: at(1)?,
        high_price: at(2)?,
        low_price: at(3)?,
        close_price: at(4)?,
        volume: at(5)?,
        quote_volume,
    })
}

// Shape primitives.

fn fail(ep: Endpoint, path: &str, reason: impl Into<String>) -> CryptowatchError {
    let path = if path.is_empty() { "result" } else { path };
    CryptowatchError::shape(ep, path, reason)
}

fn child(path: &str, key: &str) -> String {
    if path.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", path, key)
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}

fn object<'a>(ep: Endpoint, path: &str, value: &'a Value) -> Result<&'a Map<String, Value>> {
    value
        .as_object()
        .ok_or_else(|| fail(ep, path, format!("expected an object, got {}", kind(value))))
}

fn array<'a>(ep: Endpoint, path: &str, value: &'a Value) -> Result<&'a Vec<Value>> {
    value
        .as_array()
        .ok_or_else(|| fail(ep, path, format!("expected a list, got {}", kind(value))))
}

fn field<'a>(
    ep: Endpoint,
    path: &str,
    obj: &'a Map<String, Value>,
    key: &str,
) -> Result<&'a Value> {
    obj.get(key)
        .ok_or_else(|| fail(ep, &child(path, key), "missing key"))
}

fn number(ep: Endpoint, path: &str, value: &Value) -> Result<f64> {
    match value {
        Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| fail(ep, path, format!("number {} is not representable", n))),
        other => Err(fail(ep, path, format!("expected a number, got {}", kind(other)))),
    }
}

/// An integral quantity carried as a JSON number, truncated toward zero.
fn integral(ep: Endpoint, path: &str, value: &Value) -> Result<i64> {
    let n = number(ep, path, value)?;
    truncate_i64(n)
        .ok_or_else(|| fail(ep, path, format!("{} does not fit in a 64-bit integer", n)))
}

/// Truncate toward zero, or `None` when the result is outside the `i64` range.
pub(crate) fn truncate_i64(n: f64) -> Option<i64> {
    // i64::MAX as f64 rounds up to 2^63, which is itself out of range.
    let n = n.trunc();
    (n >= i64::MIN as f64 && n < i64::MAX as f64).then_some(n as i64)
}

fn string<'a>(ep: Endpoint, path: &str, value: &'a Value) -> Result<&'a str> {
    value
        .as_str()
        .ok_or_else(|| fail(ep, path, format!("expected a string, got {}", kind(value))))
}

fn tuple<'a, const N: usize>(ep: Endpoint, path: &str, value: &'a Value) -> Result<&'a [Value; N]> {
    let items = array(ep, path, value)?;
    <&[Value; N]>::try_from(items.as_slice())
        .map_err(|_| fail(ep, path, format!("expected {} elements, got {}", N, items.len())))
}

fn unix_time(ep: Endpoint, path: &str, timestamp: i64) -> Result<OffsetDateTime> {
    OffsetDateTime::from_unix_timestamp(timestamp)
        .map_err(|e| fail(ep, path, format!("timestamp {} out of range: {}", timestamp, e)))
}
