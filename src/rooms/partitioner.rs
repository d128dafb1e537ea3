//! Initial grouping of a flight's travelers into fixed-capacity rooms

use crate::clients::{Gender, Traveler};

use super::rooms_model::{room_label, Room};

/// Groups travelers into rooms of at most `capacity` members.
///
/// Travelers are split into gender cohorts (male first, then female, then
/// any further gender in order of first appearance), each cohort is sorted
/// by birthdate ascending (oldest-born first), and sorted cohorts are cut
/// into consecutive chunks of `capacity`. The last room of a cohort may be
/// under-full; an empty cohort contributes no rooms at all.
///
/// Output is a pure function of the input order and birthdates.
pub fn partition(travelers: &[Traveler], capacity: usize) -> Vec<Room> {
    if capacity == 0 {
        return Vec::new();
    }

    let mut cohorts: Vec<(Gender, Vec<Traveler>)> = vec![
        (Gender::Male, Vec::new()),
        (Gender::Female, Vec::new()),
    ];
    for traveler in travelers {
        match cohorts.iter_mut().find(|(g, _)| *g == traveler.sex) {
            Some((_, cohort)) => cohort.push(traveler.clone()),
            None => cohorts.push((traveler.sex.clone(), vec![traveler.clone()])),
        }
    }

    let mut rooms = Vec::new();
    for (_, mut cohort) in cohorts {
        // Stable, so same-day birthdays keep their input order
        cohort.sort_by_key(|t| t.birthday);
        for chunk in cohort.chunks(capacity) {
            let mut room = Room::new(room_label(rooms.len()), capacity);
            room.members = chunk.to_vec();
            rooms.push(room);
        }
    }
    rooms
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::{PaymentStatus, VisaStatus};
    use std::collections::HashSet;

    fn traveler(id: &str, sex: Gender, birthday: &str) -> Traveler {
        Traveler {
            id: id.to_string(),
            first_name: id.to_string(),
            last_name: "Test".to_string(),
            birthday: birthday.parse().unwrap(),
            sex,
            passport_number: format!("P{}", id),
            from: None,
            payment_status: PaymentStatus::default(),
            visa_status: VisaStatus::default(),
            flights: vec![],
        }
    }

    #[test]
    fn five_males_capacity_four_yields_four_plus_one() {
        let travelers: Vec<Traveler> = (1..=5)
            .map(|i| traveler(&format!("m{}", i), Gender::Male, &format!("198{}-01-01", i)))
            .collect();

        let rooms = partition(&travelers, 4);
        assert_eq!(rooms.len(), 2);
        assert_eq!(rooms[0].member_ids(), ["m1", "m2", "m3", "m4"]);
        assert_eq!(rooms[1].member_ids(), ["m5"]);
        // No placeholder room for the empty female cohort
        assert!(rooms.iter().all(|r| !r.members.is_empty()));
    }

    #[test]
    fn cohorts_sorted_oldest_born_first() {
        let travelers = vec![
            traveler("young", Gender::Female, "2001-05-01"),
            traveler("old", Gender::Female, "1960-02-01"),
            traveler("mid", Gender::Female, "1985-09-01"),
        ];
        let rooms = partition(&travelers, 4);
        assert_eq!(rooms.len(), 1);
        assert_eq!(rooms[0].member_ids(), ["old", "mid", "young"]);
    }

    #[test]
    fn male_rooms_precede_female_rooms() {
        let travelers = vec![
            traveler("f1", Gender::Female, "1990-01-01"),
            traveler("m1", Gender::Male, "1990-01-01"),
        ];
        let rooms = partition(&travelers, 4);
        assert_eq!(rooms[0].member_ids(), ["m1"]);
        assert_eq!(rooms[1].member_ids(), ["f1"]);
        assert_eq!(rooms[0].id, "Room-1");
        assert_eq!(rooms[1].id, "Room-2");
    }

    #[test]
    fn partition_covers_input_exactly() {
        let travelers: Vec<Traveler> = (0..13)
            .map(|i| {
                let sex = if i % 3 == 0 { Gender::Female } else { Gender::Male };
                traveler(&format!("t{}", i), sex, &format!("19{:02}-06-15", 50 + i))
            })
            .collect();

        let rooms = partition(&travelers, 4);
        assert!(rooms.iter().all(|r| r.members.len() <= 4));

        // At most one under-full room per cohort
        for sex in [Gender::Male, Gender::Female] {
            let underfull = rooms
                .iter()
                .filter(|r| r.members.first().map(|m| m.sex.clone()) == Some(sex.clone()))
                .filter(|r| r.members.len() < 4)
                .count();
            assert!(underfull <= 1);
        }

        let mut seen = HashSet::new();
        for room in &rooms {
            for member in &room.members {
                assert!(seen.insert(member.id.clone()), "duplicate member {}", member.id);
            }
        }
        assert_eq!(seen.len(), travelers.len());
    }

    #[test]
    fn unknown_gender_forms_its_own_cohort() {
        let travelers = vec![
            traveler("m1", Gender::Male, "1990-01-01"),
            traveler("x1", Gender::Other("nonbinary".to_string()), "1992-01-01"),
        ];
        let rooms = partition(&travelers, 4);
        assert_eq!(rooms.len(), 2);
        assert_eq!(rooms[1].member_ids(), ["x1"]);
    }

    #[test]
    fn zero_capacity_yields_no_rooms() {
        let travelers = vec![traveler("m1", Gender::Male, "1990-01-01")];
        assert!(partition(&travelers, 0).is_empty());
    }
}
