//! The knowledge base the chat widget answers from.
//!
//! Shipped as static data; entries are matched in the order listed here.

use serde::Serialize;

/// One canned question with its answer and the keywords that route to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct KnowledgeEntry {
    pub question: &'static str,
    pub answer: &'static str,
    pub keywords: &'static [&'static str],
}

/// Returned when no entry scores above the match threshold.
pub const FALLBACK_ANSWER: &str = "I'm not sure about that specific question. You can ask me about:\n\
• Skills & Technologies\n\
• Professional Experience\n\
• Major Projects (Defense, Healthcare, HR, etc.)\n\
• Contact Information\n\
• Rates & Availability\n\
• Development Approach";

/// Appended in place of an answer when matching fails.
pub const APOLOGY_ANSWER: &str =
    "Sorry, I encountered an error. Please try again later or contact Devkanta directly.";

/// Canned prompts offered next to the input box.
pub const QUICK_QUESTIONS: &[&str] = &[
    "Major projects?",
    "Technical skills?",
    "Contact information",
    "Development approach",
    "Rates & availability",
    "Professional experience",
];

pub static KNOWLEDGE_BASE: &[KnowledgeEntry] = &[
    KnowledgeEntry {
        question: "Who is Devkanta Singh?",
        answer: "Devkanta Singh is a full-stack developer and software engineer with expertise in \
                 building scalable, high-performance applications. Specializing in modern web \
                 technologies, he combines technical excellence with strategic thinking to \
                 deliver exceptional digital solutions.",
        keywords: &[
            "who is dev",
            "about",
            "profile",
            "developer",
            "software engineer",
            "introduction",
        ],
    },
    KnowledgeEntry {
        question: "What are your core technical skills?",
        answer: "Frontend: React, Next.js, TypeScript, JavaScript (ES6+), Tailwind CSS, Shadcn UI, \
                 Material-UI, Framer Motion\n\
                 Backend: Node.js, Express.js, Python (Django/Flask), REST APIs, GraphQL, WebSockets\n\
                 Databases: PostgreSQL, MongoDB, MySQL, Redis, Supabase\n\
                 DevOps & Cloud: Docker, Kubernetes, AWS, Vercel, GitHub Actions, CI/CD\n\
                 Tools: Git, VS Code, Figma, Postman, Jira, Agile/Scrum",
        keywords: &[
            "skills",
            "tech stack",
            "technologies",
            "programming",
            "tools",
            "expertise",
        ],
    },
    KnowledgeEntry {
        question: "Tell me about your professional experience",
        answer: "I have extensive experience in building enterprise-grade applications across \
                 multiple domains including defense, healthcare, HR management, education, and \
                 content management. My work focuses on creating secure, scalable, and \
                 user-friendly solutions that solve real-world problems. I follow industry best \
                 practices, clean architecture patterns, and maintain high code quality standards.",
        keywords: &["experience", "work", "background", "career", "professional"],
    },
    KnowledgeEntry {
        question: "What major projects have you built?",
        answer: "1. **Assam Rifles Defense Project**: Secure military-grade application with \
                 advanced authentication and real-time communication systems\n\
                 2. **Healthcare Solutions**: Appointment Booking management systems, telemedicine \
                 platforms, and medical record management\n\
                 3. **HR Management Systems**: Employee portals, payroll systems, and performance \
                 tracking applications\n\
                 4. **School ERP**: Complete educational management system for schools and \
                 universities\n\
                 5. **Content Management Systems**: Custom CMS solutions for various industries\n\
                 6. **AI Tools**: Machine learning integrations, chatbots, and predictive analytics \
                 systems\n\
                 7. **Modern Websites**: High-performance web applications using latest technologies",
        keywords: &[
            "projects",
            "portfolio",
            "work examples",
            "applications",
            "software",
        ],
    },
    KnowledgeEntry {
        question: "How can I contact you?",
        answer: "Primary Contact: devakantakonsam782@gmail.com\n\
                 Social Media:\n\
                 - Facebook: facebook.com/devkant.konsam\n\
                 - Instagram: instagram.com/dev_since_1998\n\
                 You can also use the contact form on this website which will send your message \
                 directly to my email.",
        keywords: &[
            "contact",
            "email",
            "reach",
            "social media",
            "connect",
            "hire",
        ],
    },
    KnowledgeEntry {
        question: "What is your development philosophy?",
        answer: "I believe in: Clean Code Architecture, Test-Driven Development (TDD), Performance \
                 Optimization, Security First Approach, Scalable System Design, User-Centric \
                 Development, Continuous Learning & Adaptation, and Collaborative Problem Solving. \
                 Every project receives meticulous attention to detail and follows industry best \
                 practices.",
        keywords: &[
            "philosophy",
            "approach",
            "methodology",
            "principles",
            "values",
        ],
    },
    KnowledgeEntry {
        question: "What industries have you worked in?",
        answer: "I have delivered solutions across: Defense & Security, Healthcare & Medical, \
                 Education & E-Learning, Human Resources, E-commerce & Retail, Content Management \
                 & Publishing, Finance & Banking, and Government Sectors. Each project is tailored \
                 to meet specific industry requirements and compliance standards.",
        keywords: &["industries", "sectors", "domains", "fields"],
    },
    KnowledgeEntry {
        question: "What are your rates and availability?",
        answer: "I'm currently available for new projects and collaborations. Rates are \
                 project-based and depend on scope, complexity, and timeline. I offer flexible \
                 engagement models: Hourly, Project-Based, and Retainer options. For detailed \
                 proposals, please contact me directly with your project requirements.",
        keywords: &[
            "rates",
            "pricing",
            "cost",
            "availability",
            "hire",
            "freelance",
        ],
    },
    KnowledgeEntry {
        question: "Do you work with teams?",
        answer: "Yes, I have experience working in agile teams using Scrum methodology. I'm \
                 comfortable collaborating with designers, product managers, QA engineers, and \
                 other developers. I can also lead technical teams and provide architecture \
                 guidance for complex projects.",
        keywords: &["team", "collaboration", "work with others", "agile"],
    },
    KnowledgeEntry {
        question: "What makes your approach unique?",
        answer: "1. **Security-First Mindset**: Especially crucial for defense and healthcare \
                 projects\n\
                 2. **Scalability Focus**: Building systems that grow with your business\n\
                 3. **Performance Optimization**: Ensuring fast, responsive applications\n\
                 4. **Modern Tech Stack**: Using latest, well-supported technologies\n\
                 5. **Clear Communication**: Regular updates and transparent processes\n\
                 6. **Post-Deployment Support**: Ongoing maintenance and optimization",
        keywords: &["unique", "different", "strengths", "advantages"],
    },
    KnowledgeEntry {
        question: "Can you handle large-scale projects?",
        answer: "Absolutely. I have experience with enterprise-level applications handling \
                 thousands of users, complex data relationships, and high-security requirements. \
                 My projects include proper documentation, maintainable codebase, and scalable \
                 architecture patterns.",
        keywords: &["large scale", "enterprise", "complex", "big projects"],
    },
    KnowledgeEntry {
        question: "What is your educational background?",
        answer: "I hold a strong technical foundation in computer science and software \
                 engineering, combined with continuous learning through online courses, \
                 certifications, and hands-on project experience. I stay updated with the latest \
                 industry trends and technologies.",
        keywords: &["education", "qualification", "degree", "learning"],
    },
];
