pub mod contacts;
pub mod emergency_contacts;
pub mod employees;

pub use contacts::Entity as Contacts;
pub use contacts::Model as Contact;
pub use emergency_contacts::Entity as EmergencyContacts;
pub use emergency_contacts::Model as EmergencyContact;
pub use employees::Entity as Employees;
pub use employees::Model as Employee;
