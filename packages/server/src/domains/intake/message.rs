use crate::domains::customers::Customer;

pub const NOTIFICATION_SUBJECT: &str = "Customer's installation request";

/// Plain-text body sent to the assigned installer
pub fn notification_body(customer: &Customer) -> String {
    format!(
        "A user has requested more info and/or a demo of a PROTECT fog cannon.\n\
         Please contact the below-mentioned person.\n\n\
         Name: {};\n\
         Postal code: {};\n\
         Phone number: {};\n\
         Email: {};\n",
        customer.name, customer.postal_code, customer.phone_number, customer.email
    )
}
