use anyhow::Context;
use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{params, Connection, OptionalExtension};

use crate::models::{AdminAction, Booking, BookingStatus, Contact, RouteLeg};

const BOOKING_COLUMNS: &str = "id, service_type, sub_service_type, source_city, route, \
     pickup_date_time, drop_date_time, distance, status, contact_name, contact_email, \
     contact_phone, admin_action, created_at, updated_at";

// ── Bookings ──

pub fn insert_booking(conn: &Connection, booking: &Booking) -> anyhow::Result<()> {
    let route = serde_json::to_string(&booking.route)?;
    let admin_action = booking
        .admin_action
        .as_ref()
        .map(serde_json::to_string)
        .transpose()?;

    conn.execute(
        "INSERT INTO bookings (id, service_type, sub_service_type, source_city, route,
             pickup_date_time, drop_date_time, distance, status, contact_name, contact_email,
             contact_phone, admin_action, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15)",
        params![
            booking.id,
            booking.service_type,
            booking.sub_service_type,
            booking.source_city,
            route,
            booking.pickup_date_time.as_ref().map(format_timestamp),
            booking.drop_date_time.as_ref().map(format_timestamp),
            booking.distance,
            booking.status.as_str(),
            booking.contact.name,
            booking.contact.email,
            booking.contact.phone,
            admin_action,
            format_timestamp(&booking.created_at),
            format_timestamp(&booking.updated_at),
        ],
    )
    .context("failed to insert booking")?;
    Ok(())
}

/// Every booking, in insertion order.
pub fn list_bookings(conn: &Connection) -> anyhow::Result<Vec<Booking>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {BOOKING_COLUMNS} FROM bookings ORDER BY rowid ASC"
    ))?;

    let rows = stmt.query_map([], |row| Ok(parse_booking_row(row)))?;

    let mut bookings = vec![];
    for row in rows {
        bookings.push(row??);
    }
    Ok(bookings)
}

pub fn get_booking_by_id(conn: &Connection, id: &str) -> anyhow::Result<Option<Booking>> {
    let result = conn
        .query_row(
            &format!("SELECT {BOOKING_COLUMNS} FROM bookings WHERE id = ?1"),
            params![id],
            |row| Ok(parse_booking_row(row)),
        )
        .optional()?;

    result.transpose()
}

/// Sets the status and admin action together. Returns the updated booking,
/// or `None` if no booking has this id.
pub fn apply_admin_action(
    conn: &Connection,
    id: &str,
    action: &AdminAction,
) -> anyhow::Result<Option<Booking>> {
    let status = BookingStatus::from(action.action);
    let admin_action = serde_json::to_string(action)?;

    let count = conn
        .execute(
            "UPDATE bookings SET status = ?1, admin_action = ?2, updated_at = ?3 WHERE id = ?4",
            params![
                status.as_str(),
                admin_action,
                format_timestamp(&action.action_date_time),
                id
            ],
        )
        .context("failed to update booking")?;

    if count == 0 {
        return Ok(None);
    }
    get_booking_by_id(conn, id)
}

/// Removes a booking and returns what was stored.
pub fn delete_booking(conn: &Connection, id: &str) -> anyhow::Result<Option<Booking>> {
    let tx = conn.unchecked_transaction()?;

    let Some(booking) = get_booking_by_id(&tx, id)? else {
        return Ok(None);
    };
    tx.execute("DELETE FROM bookings WHERE id = ?1", params![id])
        .context("failed to delete booking")?;
    tx.commit()?;

    Ok(Some(booking))
}

fn parse_booking_row(row: &rusqlite::Row) -> anyhow::Result<Booking> {
    let id: String = row.get(0)?;
    let route_json: String = row.get(4)?;
    let pickup_str: Option<String> = row.get(5)?;
    let drop_str: Option<String> = row.get(6)?;
    let status_str: String = row.get(8)?;
    let admin_action_json: Option<String> = row.get(12)?;
    let created_at_str: String = row.get(13)?;
    let updated_at_str: String = row.get(14)?;

    let route: Vec<RouteLeg> = serde_json::from_str(&route_json)
        .with_context(|| format!("corrupt route for booking {id}"))?;
    let admin_action: Option<AdminAction> = admin_action_json
        .as_deref()
        .map(serde_json::from_str)
        .transpose()
        .with_context(|| format!("corrupt admin action for booking {id}"))?;
    let status = BookingStatus::parse(&status_str)
        .with_context(|| format!("unknown status {status_str:?} for booking {id}"))?;

    Ok(Booking {
        service_type: row.get(1)?,
        sub_service_type: row.get(2)?,
        source_city: row.get(3)?,
        route,
        pickup_date_time: pickup_str.as_deref().map(parse_timestamp).transpose()?,
        drop_date_time: drop_str.as_deref().map(parse_timestamp).transpose()?,
        distance: row.get(7)?,
        status,
        contact: Contact {
            name: row.get(9)?,
            email: row.get(10)?,
            phone: row.get(11)?,
        },
        admin_action,
        created_at: parse_timestamp(&created_at_str)?,
        updated_at: parse_timestamp(&updated_at_str)?,
        id,
    })
}

fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

fn parse_timestamp(s: &str) -> anyhow::Result<DateTime<Utc>> {
    let ts = DateTime::parse_from_rfc3339(s).with_context(|| format!("bad timestamp: {s}"))?;
    Ok(ts.with_timezone(&Utc))
}
