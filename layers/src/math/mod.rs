mod utm;

pub(crate) use utm::utm_to_geographic;
