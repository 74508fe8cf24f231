//! Static service facts shared by the FAQ page section and the chatbot prompt.

use crate::domain::faq::FaqEntry;

pub const COMPANY_NAME: &str = "StellarGenix Pavement Solutions";

pub const SERVICE_DESCRIPTION: &str = "StellarGenix Pavement Solutions provides precision striping, crack-fill, and seal-coat services for parking lots in Houston and Dallas.";

pub const KEY_BENEFITS: [&str; 5] = [
    "TBL® traffic paint that lasts 2-3x longer than standard paint",
    "Laser-level layout for precision",
    "ADA compliance audits and signage",
    "72-hour turnaround",
    "\"Stay-Sharp\" 1,095-Day Warranty",
];

/// Short answers embedded in the chatbot prompt.
pub const PROMPT_FAQ: [(&str, &str); 4] = [
    (
        "Why TBL® paint vs. standard?",
        "TBL paint lasts 2-3x longer, reducing repaint cycles and costs.",
    ),
    ("How soon can crews mobilize after PO?", "Typically within 72 hours."),
    (
        "What if weather delays?",
        "We will reschedule at the earliest opportunity to minimize disruption.",
    ),
    (
        "Payment & financing options?",
        "We offer various payment options, including financing for qualified customers.",
    ),
];

/// Long-form answers rendered in the page's FAQ section.
pub const FAQ_ENTRIES: [FaqEntry; 4] = [
    FaqEntry {
        question: "Why TBL® paint vs. standard?",
        answer: "Our TBL® traffic paint lasts 2-3 times longer than standard paint. This significantly reduces how often you need to repaint, saving you money on materials and labor over the long term and minimizing disruption to your business.",
    },
    FaqEntry {
        question: "How soon can crews mobilize after a purchase order?",
        answer: "Typically, our crews can be on-site and ready to work within 72 hours of receiving a purchase order. We pride ourselves on our rapid response and efficient scheduling to get your project completed quickly.",
    },
    FaqEntry {
        question: "What happens if weather causes delays?",
        answer: "Safety and quality are our top priorities. If weather conditions are not suitable for pavement work, we will proactively communicate with you to reschedule at the earliest possible opportunity, ensuring minimal disruption to your operations.",
    },
    FaqEntry {
        question: "What are your payment and financing options?",
        answer: "We offer a variety of convenient payment options to suit your needs. For qualified customers, we also provide flexible financing plans to help manage the investment in your property's safety and appearance.",
    },
];

pub const CHAT_GREETING: &str =
    "Hello! How can I help you with StellarGenix Pavement Solutions today?";
