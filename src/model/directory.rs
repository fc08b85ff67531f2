use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A room the housekeeping crew can be sent to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Room {
    pub id: Uuid,
    pub number: String,
    pub floor: i32,
}

impl Room {
    pub fn new(number: impl Into<String>, floor: i32) -> Self {
        Self {
            id: Uuid::new_v4(),
            number: number.into(),
            floor,
        }
    }
}

/// A staff member tasks can be assigned to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Staff {
    pub id: Uuid,
    pub name: String,
    pub role: String,
}

impl Staff {
    pub fn new(name: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            role: role.into(),
        }
    }
}

/// Read-only lookup of rooms and staff. The task store validates foreign
/// references against it and joins display names from it, but never owns
/// or mutates the entries.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Directory {
    rooms: Vec<Room>,
    staff: Vec<Staff>,
}

impl Directory {
    pub fn new(rooms: Vec<Room>, staff: Vec<Staff>) -> Self {
        Self { rooms, staff }
    }

    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    pub fn staff(&self) -> &[Staff] {
        &self.staff
    }

    pub fn room_exists(&self, id: Uuid) -> bool {
        self.rooms.iter().any(|r| r.id == id)
    }

    pub fn staff_exists(&self, id: Uuid) -> bool {
        self.staff.iter().any(|s| s.id == id)
    }

    pub fn room_number(&self, id: Uuid) -> Option<&str> {
        self.rooms
            .iter()
            .find(|r| r.id == id)
            .map(|r| r.number.as_str())
    }

    pub fn staff_name(&self, id: Uuid) -> Option<&str> {
        self.staff
            .iter()
            .find(|s| s.id == id)
            .map(|s| s.name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_by_id() {
        let room = Room::new("101", 1);
        let cleaner = Staff::new("Maria Santos", "Housekeeper");
        let room_id = room.id;
        let staff_id = cleaner.id;
        let dir = Directory::new(vec![room], vec![cleaner]);

        assert!(dir.room_exists(room_id));
        assert!(dir.staff_exists(staff_id));
        assert_eq!(dir.room_number(room_id), Some("101"));
        assert_eq!(dir.staff_name(staff_id), Some("Maria Santos"));

        let unknown = Uuid::new_v4();
        assert!(!dir.room_exists(unknown));
        assert_eq!(dir.staff_name(unknown), None);
    }
}
