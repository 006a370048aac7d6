// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};

use crate::models::{Appointment, AppointmentStatus};
use crate::store::{APPOINTMENTS, MEMBERS, Store};
use crate::utils::{in_month, maybe_print_json, next_id, parse_date, pretty_table};

pub fn handle(store: &Store, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(store, sub)?,
        Some(("list", sub)) => list(store, sub)?,
        Some(("cancel", sub)) => set_status(store, sub, AppointmentStatus::Cancelled)?,
        Some(("complete", sub)) => set_status(store, sub, AppointmentStatus::Completed)?,
        Some(("rm", sub)) => rm(store, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let member_id = *sub.get_one::<i64>("member").unwrap();
    let trainer_id = *sub.get_one::<i64>("trainer").unwrap();
    let date = parse_date(sub.get_one::<String>("date").unwrap())?;

    let mut members = store.members()?;
    let staff = store.staff()?;
    let member = members
        .iter_mut()
        .find(|m| m.id == member_id)
        .with_context(|| format!("Member {} not found", member_id))?;
    staff
        .iter()
        .find(|s| s.id == trainer_id)
        .with_context(|| format!("Staff {} not found", trainer_id))?;

    if let Some(end) = member.end_date {
        if date > end {
            eprintln!(
                "warning: appointment is past the package validity (last day {})",
                end
            );
        }
    }

    // One session is consumed at booking time.
    if let Some(sessions) = member.remaining_sessions {
        if sessions > 0 {
            member.remaining_sessions = Some(sessions - 1);
        }
    }

    let mut appointments = store.appointments()?;
    let id = next_id(appointments.iter().map(|a| a.id));
    appointments.push(Appointment {
        id,
        member_id,
        trainer_id,
        date,
        time: sub.get_one::<String>("time").unwrap().clone(),
        kind: sub.get_one::<String>("kind").unwrap().clone(),
        status: AppointmentStatus::Scheduled,
    });
    store.write(MEMBERS, &members)?;
    store.write(APPOINTMENTS, &appointments)?;
    println!("Booked appointment {} on {}", id, date);
    Ok(())
}

fn status_label(s: AppointmentStatus) -> &'static str {
    match s {
        AppointmentStatus::Scheduled => "scheduled",
        AppointmentStatus::Cancelled => "cancelled",
        AppointmentStatus::Completed => "completed",
    }
}

fn list(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let appointments = store.appointments()?;
    let members = store.members()?;
    let staff = store.staff()?;

    let month = sub.get_one::<String>("month");
    let trainer = sub.get_one::<i64>("trainer").copied();

    let data: Vec<Vec<String>> = appointments
        .iter()
        .filter(|a| month.is_none_or(|mo| in_month(a.date, mo)))
        .filter(|a| trainer.is_none_or(|t| a.trainer_id == t))
        .map(|a| {
            let member = members
                .iter()
                .find(|m| m.id == a.member_id)
                .map(|m| m.full_name.clone())
                .unwrap_or_else(|| format!("#{}", a.member_id));
            let tr = staff
                .iter()
                .find(|s| s.id == a.trainer_id)
                .map(|s| s.name.clone())
                .unwrap_or_else(|| format!("#{}", a.trainer_id));
            vec![
                a.id.to_string(),
                a.date.to_string(),
                a.time.clone(),
                member,
                tr,
                a.kind.clone(),
                status_label(a.status).to_string(),
            ]
        })
        .collect();

    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        println!(
            "{}",
            pretty_table(
                &["ID", "Date", "Time", "Member", "Trainer", "Kind", "Status"],
                data,
            )
        );
    }
    Ok(())
}

fn set_status(store: &Store, sub: &clap::ArgMatches, status: AppointmentStatus) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    let mut appointments = store.appointments()?;
    let appt = appointments
        .iter_mut()
        .find(|a| a.id == id)
        .with_context(|| format!("Appointment {} not found", id))?;
    // A cancellation forfeits the session; no refund.
    appt.status = status;
    store.write(APPOINTMENTS, &appointments)?;
    println!("Appointment {} marked {}", id, status_label(status));
    Ok(())
}

fn rm(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    let mut appointments = store.appointments()?;
    let appt = appointments
        .iter()
        .find(|a| a.id == id)
        .with_context(|| format!("Appointment {} not found", id))?;

    // Deleting a booking refunds the consumed session, unlike cancelling.
    let member_id = appt.member_id;
    let mut members = store.members()?;
    if let Some(member) = members.iter_mut().find(|m| m.id == member_id) {
        if let Some(sessions) = member.remaining_sessions {
            member.remaining_sessions = Some(sessions + 1);
        }
    }

    appointments.retain(|a| a.id != id);
    store.write(MEMBERS, &members)?;
    store.write(APPOINTMENTS, &appointments)?;
    println!("Removed appointment {}", id);
    Ok(())
}
