mod address;
mod deposit;
mod withdrawal;
