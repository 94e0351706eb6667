use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Application role. The backend stores roles in a table; the UI only
/// needs to know which of the four well-known roles a user has.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Administrador,
    Asesor,
    Supervisor,
    Mensajero,
}

impl Role {
    pub const ALL: [Role; 4] = [
        Role::Administrador,
        Role::Asesor,
        Role::Supervisor,
        Role::Mensajero,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Administrador => "Administrador",
            Role::Asesor => "Asesor",
            Role::Supervisor => "Supervisor",
            Role::Mensajero => "Mensajero",
        }
    }

    pub fn is_staff(&self) -> bool {
        !matches!(self, Role::Mensajero)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lowercase and drop Spanish accents so "ADMINISTRADOR" and "administrador" compare equal.
fn normalize(s: &str) -> String {
    s.trim()
        .chars()
        .map(|c| match c {
            'á' | 'Á' => 'a',
            'é' | 'É' => 'e',
            'í' | 'Í' => 'i',
            'ó' | 'Ó' => 'o',
            'ú' | 'Ú' | 'ü' | 'Ü' => 'u',
            other => other.to_ascii_lowercase(),
        })
        .collect()
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "administrador" | "admin" | "administrator" => Ok(Role::Administrador),
            "asesor" | "advisor" => Ok(Role::Asesor),
            "supervisor" => Ok(Role::Supervisor),
            "mensajero" | "courier" | "repartidor" => Ok(Role::Mensajero),
            _ => Err(format!("Rol desconocido: {s}")),
        }
    }
}

impl Serialize for Role {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Role {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RoleField::deserialize(deserializer)?;
        raw.into_role().map_err(serde::de::Error::custom)
    }
}

/// The backend sends a role either as its name or as the joined row.
#[derive(Deserialize)]
#[serde(untagged)]
pub(crate) enum RoleField {
    Name(String),
    Row {
        #[serde(alias = "nombre")]
        nombre_rol: String,
    },
}

impl RoleField {
    pub(crate) fn into_role(self) -> Result<Role, String> {
        match self {
            RoleField::Name(name) => name.parse(),
            RoleField::Row { nombre_rol } => nombre_rol.parse(),
        }
    }
}

/// Optional role; unknown names decode as `None` instead of failing the whole row.
pub fn opt_role<'de, D>(deserializer: D) -> Result<Option<Role>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<RoleField>::deserialize(deserializer)?;
    Ok(raw.and_then(|r| r.into_role().ok()))
}

/// Row of `/roles`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleRecord {
    #[serde(rename = "id_rol")]
    pub id: i64,
    #[serde(rename = "nombre_rol", alias = "nombre")]
    pub name: String,
}

impl RoleRecord {
    pub fn role(&self) -> Option<Role> {
        self.name.parse().ok()
    }
}

/// Find the role for a role id using the `/roles` catalog.
pub fn role_for_id(records: &[RoleRecord], id: i64) -> Option<Role> {
    records.iter().find(|r| r.id == id).and_then(RoleRecord::role)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_lenient_names() {
        assert_eq!("ADMINISTRADOR".parse::<Role>(), Ok(Role::Administrador));
        assert_eq!("admin".parse::<Role>(), Ok(Role::Administrador));
        assert_eq!(" Asesor ".parse::<Role>(), Ok(Role::Asesor));
        assert_eq!("Mensajero".parse::<Role>(), Ok(Role::Mensajero));
        assert!("cliente".parse::<Role>().is_err());
    }

    #[test]
    fn test_deserialize_string_or_row() {
        let a: Role = serde_json::from_value(json!("supervisor")).unwrap();
        let b: Role = serde_json::from_value(json!({"id_rol": 3, "nombre_rol": "Supervisor"})).unwrap();
        assert_eq!(a, b);
        assert_eq!(serde_json::to_value(a).unwrap(), json!("Supervisor"));
    }

    #[test]
    fn test_role_catalog() {
        let records: Vec<RoleRecord> = serde_json::from_value(json!([
            {"id_rol": 1, "nombre_rol": "Administrador"},
            {"id_rol": 4, "nombre": "Mensajero"}
        ]))
        .unwrap();
        assert_eq!(role_for_id(&records, 4), Some(Role::Mensajero));
        assert_eq!(role_for_id(&records, 9), None);
    }

    #[test]
    fn test_staff() {
        assert!(Role::Supervisor.is_staff());
        assert!(!Role::Mensajero.is_staff());
    }
}
