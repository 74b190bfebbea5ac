//! Static copy for the landing page.

pub struct FaqEntry {
    pub id: u32,
    pub category: &'static str,
    pub question: &'static str,
    pub answer: &'static str,
}

pub const FAQ_DATA: &[FaqEntry] = &[
    FaqEntry {
        id: 1,
        category: "About CareLoop",
        question: "What is CareLoop?",
        answer: "CareLoop is an AI-powered health companion that connects local pharmacies, helpers, and users in one ecosystem. We enable medicine ordering through chat, with local pharmacies accepting and delivering orders. Our platform goes beyond ordering: we help you manage daily health with AI-based prescription validation, wellness tips, doctor consultations, and health test bookings.",
    },
    FaqEntry {
        id: 2,
        category: "Medicine Ordering",
        question: "How do I order medicines?",
        answer: "Simply chat with our AI assistant! You can type your medicine names, upload a prescription image (our OCR will read it), or describe your symptoms. Our system broadcasts your order to nearby pharmacies, and the first available pharmacy accepts and delivers to you quickly.",
    },
    FaqEntry {
        id: 3,
        category: "Medicine Ordering",
        question: "What if no pharmacy can deliver my order?",
        answer: "If a pharmacy can't deliver, our local helper network automatically steps in to fulfill your order. These are verified local helpers who pick up from the pharmacy and deliver to your doorstep, keeping every delivery local and fast.",
    },
    FaqEntry {
        id: 4,
        category: "Delivery & Helpers",
        question: "How fast is the delivery?",
        answer: "Since we work with local pharmacies and helpers in your area, most deliveries are completed within 30-60 minutes. The exact time depends on your location and order complexity, but we prioritize hyperlocal, same-day delivery.",
    },
    FaqEntry {
        id: 5,
        category: "Features",
        question: "What other health features do you offer?",
        answer: "Beyond medicine ordering, CareLoop offers: AI health assistant for wellness advice, personalized care tips, smart medicine reminders, instant doctor consultations (telemedicine), health test bookings with sample pickup, prescription auto-sync, and a health rewards system to keep you motivated.",
    },
    FaqEntry {
        id: 6,
        category: "Trust & Safety",
        question: "How do you ensure medicine quality and safety?",
        answer: "We partner only with licensed, verified pharmacies. All helpers go through KYC verification with Aadhaar/phone authentication. Our AI validates prescriptions and suggests alternatives only from trusted brands. Every transaction is tracked and insured for your safety.",
    },
];

pub struct FeatureCard {
    pub title: &'static str,
    pub subtitle: &'static str,
    pub description: &'static str,
    pub image: &'static str,
    pub color: &'static str,
}

pub const FEATURES: &[FeatureCard] = &[
    FeatureCard {
        title: "AI-DRIVEN CARE CHAT",
        subtitle: "Guidance Whenever You Need It",
        description: "Access instant, chat-based guidance for daily wellness, skin care advice, and routine suggestions (e.g., 'Suggest a daily routine for better sleep.'). Our assistant provides verified care advice and connects you to local specialists when needed.",
        image: "/assets/are_you_doctor.webp",
        color: "#5196fd",
    },
    FeatureCard {
        title: "INSTANT DOCTOR CONSULTATION",
        subtitle: "Care Without the Wait",
        description: "Connect instantly with verified local or online doctors via video, audio, or text chat. Prescriptions are automatically stored and synced in your app, enabling instant ordering and follow-up reminders for checkups or lab tests.",
        image: "/assets/tree.jpg",
        color: "#8f89ff",
    },
    FeatureCard {
        title: "HEALTH TESTS & DIAGNOSTICS",
        subtitle: "Seamless Booking and Reports",
        description: "Book essential blood, urine, and health tests directly through the chat interface. We coordinate sample pickup by our local helper network. Receive digital reports in the app with AI-powered insights that highlight abnormal readings and offer preliminary advice.",
        image: "/assets/water.jpg",
        color: "#13006c",
    },
    FeatureCard {
        title: "MEDICINE ORDERING & DELIVERY",
        subtitle: "Local, Fast, Reliable",
        description: "Order medicines simply through chat. Our smart system instantly routes requests to local pharmacies for fast acceptance and delivery. If a pharmacy cannot deliver, our local helper network steps in to ensure hyperlocal, reliable fulfillment.",
        image: "/assets/house.jpg",
        color: "#ed649e",
    },
    FeatureCard {
        title: "SMART REMINDER SYSTEM",
        subtitle: "Never Miss a Beat",
        description: "Our AI intelligently tracks and reminds users for critical health actions: timely medicine intake, scheduling reorders, upcoming regular health checkups, or even gentle hydration alerts to keep you proactive about your health.",
        image: "/assets/cactus.jpg",
        color: "#fd521a",
    },
    FeatureCard {
        title: "HEALTH COMMUNITY & REWARDS",
        subtitle: "Stay Connected and Motivated",
        description: "Earn 'Healthy Points' for positive actions like timely medicine intake and completing health challenges. Access a community feed to share local health camps and receive pharmacy rewards, fostering a connected, community-driven ecosystem.",
        image: "/assets/cactus.jpg",
        color: "#fd521a",
    },
];

pub const VISION_TEXT: &str = "With CareLoop AI comprehensive suite of features, your personal health management reaches new heights of efficiency. By integrating chat-based medicine ordering with intelligent helper delegation, we ensure that no prescription goes unfilled and no urgent need goes unmet. From instant doctor consultations to automated substitute suggestions, every tool is designed to streamline your daily wellness journey.";

pub const HERO_TAGLINE: &str = "Chat instantly to order from local pharmacies. Our community helper network ensures fast delivery, while AI helps you stay proactive with daily wellness.";

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn faq_ids_are_unique() {
        let ids: HashSet<u32> = FAQ_DATA.iter().map(|f| f.id).collect();
        assert_eq!(ids.len(), FAQ_DATA.len());
        assert_eq!(FAQ_DATA.len(), 6);
    }
}
